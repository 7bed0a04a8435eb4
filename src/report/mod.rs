pub mod flowcell_json;
pub mod summary_txt;
