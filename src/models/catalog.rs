//! Ids offered by the story form. The backend accepts any string; these only
//! drive CLI help and warnings.

pub const GENRES: &[&str] = &[
    "fantasy",
    "sci-fi",
    "romance",
    "mystery",
    "adventure",
    "horror",
    "comedy",
    "drama",
];

pub const TONES: &[&str] = &[
    "uplifting",
    "dark",
    "humorous",
    "serious",
    "mysterious",
    "romantic",
    "adventurous",
    "melancholic",
];

pub const LENGTHS: &[&str] = &["short", "medium", "long"];

pub const THEMES: &[&str] = &[
    "Friendship",
    "Betrayal",
    "Redemption",
    "Love",
    "Family",
    "Courage",
    "Sacrifice",
    "Discovery",
    "Revenge",
    "Hope",
    "Freedom",
    "Identity",
    "Power",
    "Justice",
];

pub fn is_known_genre(id: &str) -> bool {
    GENRES.contains(&id)
}

pub fn is_known_tone(id: &str) -> bool {
    TONES.contains(&id)
}

pub fn is_known_length(id: &str) -> bool {
    LENGTHS.contains(&id)
}

/// Themes are matched case-insensitively (the form lowercases its default).
pub fn is_known_theme(theme: &str) -> bool {
    THEMES.iter().any(|t| t.eq_ignore_ascii_case(theme))
}
