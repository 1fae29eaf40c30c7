use ansi_term::Colour;

use crate::{
    analysis::mood::{classify, MoodClass},
    journal::entities::MOOD_RANGE,
};

/// Width of a bar for the highest mood.
const BAR_WIDTH: usize = 30;

pub fn mood_emoji(class: MoodClass) -> &'static str {
    match class {
        MoodClass::Sad => "☹️",
        MoodClass::Neutral => "😐",
        MoodClass::Happy => "😊",
    }
}

fn colour(class: MoodClass) -> Colour {
    match class {
        MoodClass::Sad => Colour::Red,
        MoodClass::Neutral => Colour::Yellow,
        MoodClass::Happy => Colour::Green,
    }
}

/// `😊 2.5`, coloured by class when `paint` is set.
pub fn format_mood(mood: f64, paint: bool) -> String {
    let class = classify(mood);
    let text = format!("{} {mood:.1}", mood_emoji(class));
    if paint {
        colour(class).paint(text).to_string()
    } else {
        text
    }
}

/// Horizontal bar proportional to the mood, used by the trend chart.
pub fn mood_bar(mood: f64, paint: bool) -> String {
    let filled = (mood.clamp(*MOOD_RANGE.start(), *MOOD_RANGE.end()) / MOOD_RANGE.end()
        * BAR_WIDTH as f64)
        .round() as usize;
    let bar = "█".repeat(filled);
    if paint {
        colour(classify(mood)).paint(bar).to_string()
    } else {
        bar
    }
}

/// First line of a body, cut to `max_chars` characters.
pub fn preview(body: &str, max_chars: usize) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.chars().count() > max_chars {
        let cut = line.chars().take(max_chars.saturating_sub(1)).collect::<String>();
        format!("{cut}…")
    } else if body.lines().nth(1).is_some() {
        format!("{line}…")
    } else {
        line.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use crate::analysis::mood::MoodClass;

    use super::{format_mood, mood_bar, mood_emoji, preview};

    #[test]
    fn mood_text() {
        assert_eq!(format_mood(2.46, false), "😊 2.5");
        assert_eq!(format_mood(0.0, false), "☹️ 0.0");
        assert_eq!(mood_emoji(MoodClass::Neutral), "😐");
    }

    #[test]
    fn bars() {
        assert_eq!(mood_bar(0.0, false).chars().count(), 0);
        assert_eq!(mood_bar(1.5, false).chars().count(), 15);
        assert_eq!(mood_bar(3.0, false).chars().count(), 30);
        assert_eq!(mood_bar(9.0, false).chars().count(), 30);
    }

    #[test]
    fn previews() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a longer line of text", 8), "a longe…");
        assert_eq!(preview("first\nsecond", 10), "first…");
        assert_eq!(preview("", 10), "");
    }
}
