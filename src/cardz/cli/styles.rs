use console::Style;
use once_cell::sync::Lazy;

/// Named styles used by the renderers.
pub struct Theme {
    pub index: Style,
    pub title: Style,
    pub muted: Style,
    pub time: Style,
    pub orphan: Style,
    pub question: Style,
    pub answer: Style,
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
}

pub static CARDZ_THEME: Lazy<Theme> = Lazy::new(|| Theme {
    index: Style::new().yellow(),
    title: Style::new().bold(),
    muted: Style::new().dim(),
    time: Style::new().color256(247).italic(),
    orphan: Style::new().red().italic(),
    question: Style::new().bold().cyan(),
    answer: Style::new().green(),
    info: Style::new().dim(),
    success: Style::new().green(),
    warning: Style::new().yellow(),
    error: Style::new().red(),
});

/// Apply `style`, letting `use_color` override terminal detection.
pub fn paint(style: &Style, text: &str, use_color: Option<bool>) -> String {
    match use_color {
        Some(enabled) => style.clone().force_styling(enabled).apply_to(text).to_string(),
        None => style.apply_to(text).to_string(),
    }
}
