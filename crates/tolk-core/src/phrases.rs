//! Canned phrases the user can pick instead of typing.
//!
//! Phrases are numbered from 1 across the whole catalog, in category order, so a number
//! stays the same whether or not the list was filtered by category.

pub struct PhraseCategory {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
}

pub const PHRASES: &[PhraseCategory] = &[
    PhraseCategory {
        name: "Greetings",
        phrases: &[
            "Hello",
            "Good morning",
            "Good evening",
            "How are you?",
            "Nice to meet you",
            "Goodbye",
            "See you later",
            "Thank you",
        ],
    },
    PhraseCategory {
        name: "Travel",
        phrases: &[
            "Where is the bathroom?",
            "How much does this cost?",
            "I need help",
            "Do you speak English?",
            "Where is the hotel?",
            "Can you help me?",
            "I'm lost",
            "Call a taxi",
        ],
    },
    PhraseCategory {
        name: "Food",
        phrases: &[
            "I'm hungry",
            "This is delicious",
            "The bill please",
            "Water please",
            "I'm vegetarian",
            "What do you recommend?",
            "No spicy food",
            "Can I have the menu?",
        ],
    },
    PhraseCategory {
        name: "Basic",
        phrases: &[
            "What time is it?",
            "What is your name?",
            "Where are you from?",
            "What is this?",
            "How do you say this?",
            "I don't understand",
            "Please repeat",
            "Speak slowly please",
        ],
    },
    PhraseCategory {
        name: "Emergency",
        phrases: &[
            "Help me",
            "Call the police",
            "I need a doctor",
            "Emergency",
            "Fire",
            "Call an ambulance",
            "I'm sick",
            "Where is the hospital?",
        ],
    },
    PhraseCategory {
        name: "Directions",
        phrases: &[
            "How do I get there?",
            "Turn left",
            "Turn right",
            "Go straight",
            "Stop here",
            "Is it near?",
            "Is it far?",
        ],
    },
    PhraseCategory {
        name: "Business",
        phrases: &[
            "I would like to schedule a meeting",
            "Please send me the report",
            "The project is completed",
            "We need to discuss the budget",
        ],
    },
    PhraseCategory {
        name: "Education",
        phrases: &[
            "I need help with my homework",
            "When is the exam?",
            "Can you explain this concept?",
            "The assignment is due tomorrow",
        ],
    },
    PhraseCategory {
        name: "Daily Life",
        phrases: &[
            "What's the weather like?",
            "I'm going to the store",
            "Let's have dinner together",
            "I'll call you later",
        ],
    },
];

/// Case-insensitive match on the start of a category name
pub fn find_category(query: &str) -> Option<&'static PhraseCategory> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    PHRASES
        .iter()
        .find(|c| c.name.to_lowercase().starts_with(&query))
}

/// `(number, category, phrase)` for every phrase
pub fn numbered() -> impl Iterator<Item = (usize, &'static PhraseCategory, &'static str)> {
    PHRASES
        .iter()
        .flat_map(|c| c.phrases.iter().map(move |p| (c, *p)))
        .enumerate()
        .map(|(i, (c, p))| (i + 1, c, p))
}

/// Phrase by its 1-based number
pub fn phrase(number: usize) -> Option<&'static str> {
    numbered().find(|(n, _, _)| *n == number).map(|(_, _, p)| p)
}

/// Listing for one category, or the whole catalog
pub fn describe(category: Option<&PhraseCategory>) -> String {
    let mut out = String::new();
    let mut current = "";

    for (n, c, p) in numbered() {
        if category.is_some_and(|wanted| wanted.name != c.name) {
            continue;
        }
        if c.name != current {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(c.name);
            out.push('\n');
            current = c.name;
        }
        out.push_str(&format!("  {n:>3}. {p}\n"));
    }

    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_run_across_categories() {
        assert_eq!(phrase(1), Some("Hello"));
        assert_eq!(phrase(8), Some("Thank you"));
        assert_eq!(phrase(9), Some("Where is the bathroom?"));
        assert_eq!(phrase(0), None);

        let total: usize = PHRASES.iter().map(|c| c.phrases.len()).sum();
        assert_eq!(numbered().count(), total);
        assert!(phrase(total).is_some());
        assert!(phrase(total + 1).is_none());
    }

    #[test]
    fn categories_match_by_prefix() {
        assert_eq!(find_category("emerg").map(|c| c.name), Some("Emergency"));
        assert_eq!(find_category("DAILY").map(|c| c.name), Some("Daily Life"));
        assert!(find_category("sports").is_none());
        assert!(find_category("  ").is_none());
    }

    #[test]
    fn filtered_listing_keeps_catalog_numbers() {
        let travel = describe(find_category("travel"));
        assert!(travel.starts_with("Travel\n"));
        assert!(travel.contains("    9. Where is the bathroom?"));
        assert!(!travel.contains("Hello"));

        let all = describe(None);
        assert!(all.contains("Greetings\n"));
        assert!(all.contains("\nDaily Life\n"));
    }
}
