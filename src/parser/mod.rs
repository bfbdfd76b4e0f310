pub mod tab_parser;
