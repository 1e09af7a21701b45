//! PARADIM Sorter
//!
//! 分類ルール本体は `paradim-sorter-common` にあり、
//! このクレートは走査・レポート・リンク作成・設定を受け持つ。

pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod report;
pub mod scanner;
