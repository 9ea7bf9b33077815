//! # Reporting Module / 报告模块
//!
//! This module handles the display of a finished run. It prints a colorful,
//! formatted summary to the console with internationalization support.
//!
//! 此模块处理已完成运行的显示。它在控制台打印彩色格式化摘要，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{format_summary, print_summary};
