use cyberquiz::autocomplete::{Autocomplete, SHOW_ALL_LABEL};
use cyberquiz::quiz::QuizRun;
use cyberquiz::resources;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub const MENU: &str = "🏠 Menu";
pub const MENU_GRC: &str = "🧭 GRC Wizard";
pub const MENU_SCENARIO: &str = "🌐 Scenario Sphere";
pub const MENU_RESOURCES: &str = "📚 Resources";
pub const MENU_ABOUT: &str = "ℹ️ About";

pub const KEY_UP: &str = "⬆";
pub const KEY_DOWN: &str = "⬇";
pub const KEY_ENTER: &str = "✅ Use highlighted";
pub const KEY_ESCAPE: &str = "✖ Keep typed text";

pub const GENERATE: &str = "🔁 Generate again";
pub const COPY: &str = "📋 Copy";
pub const CHANGE_SETTINGS: &str = "⚙️ Change settings";

pub const ALL_CATEGORIES: &str = "All";
pub const SORT: &str = "🔤 Sort A-Z";
pub const RANDOM: &str = "🎲 Random Resource";

pub fn menu_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![KeyboardButton::new(MENU_GRC), KeyboardButton::new(MENU_SCENARIO)],
        vec![KeyboardButton::new(MENU_RESOURCES), KeyboardButton::new(MENU_ABOUT)],
    ])
}

pub fn choice_keyboard(choices: &[&str]) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = choices
        .chunks(2)
        .map(|row| row.iter().map(|c| KeyboardButton::new(*c)).collect())
        .collect();
    rows.push(vec![KeyboardButton::new(MENU)]);
    KeyboardMarkup::new(rows)
}

/// One button per visible suggestion, then the panel's navigation keys.
pub fn suggestion_keyboard(ac: &Autocomplete) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = ac
        .visible()
        .iter()
        .map(|s| vec![KeyboardButton::new(*s)])
        .collect();
    if ac.can_show_all() {
        rows.push(vec![KeyboardButton::new(SHOW_ALL_LABEL)]);
    }
    rows.push(vec![KeyboardButton::new(KEY_UP), KeyboardButton::new(KEY_DOWN)]);
    rows.push(vec![
        KeyboardButton::new(KEY_ENTER),
        KeyboardButton::new(KEY_ESCAPE),
    ]);
    KeyboardMarkup::new(rows)
}

/// Letter shown for the option at `position`: A, B, C...
pub fn option_label(position: usize) -> char {
    u8::try_from(position)
        .ok()
        .and_then(|p| b'A'.checked_add(p))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

pub fn label_position(label: &str) -> Option<usize> {
    let mut chars = label.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !c.is_ascii_uppercase() {
        return None;
    }
    Some(usize::from(c as u8 - b'A'))
}

/// Answer buttons for every question still open, then the quiz actions.
pub fn answer_keyboard(run: &QuizRun) -> KeyboardMarkup {
    let questions = &run.set().questions;
    let mut rows: Vec<Vec<KeyboardButton>> = questions
        .iter()
        .enumerate()
        .filter(|(index, _)| !run.is_answered(*index))
        .map(|(index, q)| {
            (0..q.options.len())
                .map(|pos| {
                    if questions.len() == 1 {
                        KeyboardButton::new(option_label(pos).to_string())
                    } else {
                        KeyboardButton::new(format!("{} {}", index + 1, option_label(pos)))
                    }
                })
                .collect()
        })
        .collect();
    rows.extend(actions_rows());
    KeyboardMarkup::new(rows)
}

pub fn actions_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(actions_rows())
}

fn actions_rows() -> Vec<Vec<KeyboardButton>> {
    vec![
        vec![KeyboardButton::new(COPY), KeyboardButton::new(GENERATE)],
        vec![KeyboardButton::new(CHANGE_SETTINGS), KeyboardButton::new(MENU)],
    ]
}

pub fn resources_keyboard() -> KeyboardMarkup {
    let mut categories = vec![KeyboardButton::new(ALL_CATEGORIES)];
    categories.extend(resources::categories().map(KeyboardButton::new));
    KeyboardMarkup::new(vec![
        categories,
        vec![KeyboardButton::new(SORT), KeyboardButton::new(RANDOM)],
        vec![KeyboardButton::new(MENU)],
    ])
}
