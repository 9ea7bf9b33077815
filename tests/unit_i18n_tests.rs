//! # I18n Unit Tests / I18n 单元测试
//!
//! Locale selection and the translated strings behind status labels.
//! Every case lives in one test because the active locale is process-global.
//!
//! 测试语言选择以及状态标签背后的翻译字符串。
//! 由于当前语言是进程全局的，所有用例都放在一个测试中。

use unixbench_runner::RunStatus;

#[test]
fn test_locale_selection_and_labels() {
    assert_eq!(unixbench_runner::init(Some("en")), "en");
    assert_eq!(RunStatus::Succeeded.label(), "Succeeded");

    assert_eq!(unixbench_runner::init(Some("zh-CN")), "zh-CN");
    assert_ne!(RunStatus::Succeeded.label(), "Succeeded");
    assert!(!RunStatus::Succeeded.label().is_empty());

    // Language code with an unknown region falls back to the bare language.
    assert_eq!(unixbench_runner::init(Some("en-GB")), "en");
    assert_eq!(unixbench_runner::init(Some("en_US.UTF-8")), "en");

    assert_eq!(unixbench_runner::init(Some("invalid-lang")), "en");
    assert_eq!(unixbench_runner::init(Some("")), "en");
    assert_eq!(RunStatus::Stopped.label(), "Stopped");
}
