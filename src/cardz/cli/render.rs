//! # Rendering Module
//!
//! Turns command results into terminal text. Layout math (width, truncation,
//! padding) is Unicode-aware; styles come from [`CARDZ_THEME`].
//!
//! Every `render_*` function has an `_internal` twin taking `use_color`, so
//! tests can render without escape codes regardless of the terminal.

use super::styles::{paint, CARDZ_THEME};
use cardz::api::{CardRow, CmdMessage, GroupSummary, MessageLevel};
use cardz::config::{CardzConfig, KEYS};
use cardz::model::Millis;
use cardz::study::StudySession;
use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

pub const TIME_WIDTH: usize = 14;
const LEFT_PAD: &str = "    ";
const ORPHAN_LABEL: &str = "(no group)";

pub fn render_group_list(groups: &[GroupSummary], line_width: usize) -> String {
    render_group_list_internal(groups, line_width, None)
}

fn render_group_list_internal(
    groups: &[GroupSummary],
    line_width: usize,
    use_color: Option<bool>,
) -> String {
    if groups.is_empty() {
        return "No groups yet. Create one with `cardz group create NAME`.\n".to_string();
    }

    let theme = &*CARDZ_THEME;
    let mut out = String::new();
    for summary in groups {
        let idx = format!("{}. ", summary.index);
        let count = format!("  {:>4} card{}", summary.card_count, plural(summary.card_count));

        let mut label = summary.group.name.clone();
        if let Some(description) = &summary.group.description {
            label.push_str(" - ");
            label.push_str(description);
        }

        let fixed = LEFT_PAD.width() + idx.width() + count.width() + TIME_WIDTH;
        let available = line_width.saturating_sub(fixed);
        let label = truncate_to_width(&label, available);
        let padding = " ".repeat(available.saturating_sub(label.width()));

        // Bold only the name part, which may have been cut short.
        let name_len = summary.group.name.len().min(label.len());
        let (name, rest) = label.split_at(floor_char_boundary(&label, name_len));

        out.push_str(&format!(
            "{}{}{}{}{}{}{}\n",
            LEFT_PAD,
            paint(&theme.index, &idx, use_color),
            paint(&theme.title, name, use_color),
            paint(&theme.muted, rest, use_color),
            padding,
            count,
            paint(&theme.time, &format_time_ago(summary.group.created_at), use_color),
        ));
    }
    out
}

pub fn render_card_list(cards: &[CardRow], line_width: usize) -> String {
    render_card_list_internal(cards, line_width, None)
}

fn render_card_list_internal(
    cards: &[CardRow],
    line_width: usize,
    use_color: Option<bool>,
) -> String {
    if cards.is_empty() {
        return "No flashcards found.\n".to_string();
    }

    let theme = &*CARDZ_THEME;
    let group_width = cards
        .iter()
        .map(|row| row.group_name.as_deref().unwrap_or(ORPHAN_LABEL).width())
        .max()
        .unwrap_or(0)
        .min(20);

    let mut out = String::new();
    for row in cards {
        let idx = format!("{}. ", row.index);
        let group = truncate_to_width(
            row.group_name.as_deref().unwrap_or(ORPHAN_LABEL),
            group_width,
        );
        let group_cell = format!(
            "  {}{}",
            group,
            " ".repeat(group_width.saturating_sub(group.width()))
        );

        let fixed = LEFT_PAD.width() + idx.width() + group_cell.width() + TIME_WIDTH;
        let available = line_width.saturating_sub(fixed);
        let question_width = available * 3 / 5;
        let question = truncate_to_width(&one_line(&row.card.question), question_width);
        let answer_width = available.saturating_sub(question.width() + 3);
        let answer = truncate_to_width(&one_line(&row.card.answer), answer_width);
        let padding = " ".repeat(available.saturating_sub(question.width() + 3 + answer.width()));

        let group_style = if row.group_name.is_some() {
            &theme.muted
        } else {
            &theme.orphan
        };

        out.push_str(&format!(
            "{}{}{} → {}{}{}{}\n",
            LEFT_PAD,
            paint(&theme.index, &idx, use_color),
            paint(&theme.question, &question, use_color),
            paint(&theme.answer, &answer, use_color),
            padding,
            paint(group_style, &group_cell, use_color),
            paint(&theme.time, &format_time_ago(row.card.created_at), use_color),
        ));
    }
    out
}

/// The study screen: progress, the current card's question, and its answer
/// once flipped.
pub fn render_study_screen(session: &StudySession, group_name: Option<&str>) -> String {
    render_study_screen_internal(session, group_name, None)
}

fn render_study_screen_internal(
    session: &StudySession,
    group_name: Option<&str>,
    use_color: Option<bool>,
) -> String {
    let theme = &*CARDZ_THEME;
    let Some(card) = session.current() else {
        return "No flashcards to study.\n".to_string();
    };

    let heading = format!(
        "{}  {}/{}",
        group_name.unwrap_or("All cards"),
        session.position() + 1,
        session.len()
    );
    let mut out = String::new();
    out.push_str(&paint(&theme.title, &heading, use_color));
    out.push_str("\n\n");
    out.push_str(&format!(
        "  Q: {}\n\n",
        paint(&theme.question, &card.question, use_color)
    ));
    if session.is_flipped() {
        out.push_str(&format!(
            "  A: {}\n\n",
            paint(&theme.answer, &card.answer, use_color)
        ));
    } else {
        out.push_str(&paint(&theme.muted, "  A: (space to reveal)", use_color));
        out.push_str("\n\n");
    }
    out.push_str(&paint(
        &theme.muted,
        "←/p previous  →/n next  space/f flip  s shuffle  x delete  q quit",
        use_color,
    ));
    out.push('\n');
    out
}

pub fn render_config(config: &CardzConfig) -> String {
    KEYS.iter()
        .filter_map(|key| config.get(key).map(|value| format!("{} = {}\n", key, value)))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    let theme = &*CARDZ_THEME;
    messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => &theme.info,
                MessageLevel::Success => &theme.success,
                MessageLevel::Warning => &theme.warning,
                MessageLevel::Error => &theme.error,
            };
            format!("{}\n", paint(style, &msg.content, use_color))
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        " "
    } else {
        "s"
    }
}

fn one_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

fn format_time_ago(created_at: Millis) -> String {
    let created = DateTime::<Utc>::from_timestamp_millis(created_at).unwrap_or_else(Utc::now);
    let duration = Utc::now().signed_duration_since(created);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Pad the unit to the width of "seconds" so the "ago" column lines up.
    let time_str = time_str
        .replace("hours ago", "  hours ago")
        .replace("hour ago", "   hour ago")
        .replace("days ago", "   days ago")
        .replace("day ago", "    day ago")
        .replace("weeks ago", "  weeks ago")
        .replace("week ago", "   week ago")
        .replace("months ago", " months ago")
        .replace("month ago", "  month ago")
        .replace("years ago", "  years ago")
        .replace("year ago", "   year ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
