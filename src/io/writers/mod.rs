pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

/// Column headings shared by the table writers.
pub(crate) mod headings {
    pub const PRODUCT: &str = "Product";
    pub const LANGUAGE: &str = "Language";
    pub const FILE_COUNT: &str = "File_Count";
    pub const LOC: &str = "LOC";
    pub const FILE: &str = "File";
    pub const EXTENSION_GROUP: &str = "Extension Group";
    pub const TOTAL: &str = "Total";
}
