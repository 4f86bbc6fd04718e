use console::Style;
use once_cell::sync::Lazy;

pub struct QrvcTheme {
    pub heading: Style,
    pub value: Style,
}

pub static QRVC_THEME: Lazy<QrvcTheme> = Lazy::new(|| QrvcTheme {
    heading: Style::new().bold().underlined(),
    value: Style::new().cyan(),
});
