//! The fixed quick-reply menu.

use factbot_core::ReplyMarkup;

pub const AGE: &str = "Age";
pub const FAVOURITE_COLOUR: &str = "Favourite colour";
pub const NUMBER_OF_SIBLINGS: &str = "Number of siblings";
pub const SOMETHING_ELSE: &str = "Something else...";
pub const DONE: &str = "Done";

/// Menu labels that select a built-in category directly.
pub const FIXED_CATEGORIES: [&str; 3] = [AGE, FAVOURITE_COLOUR, NUMBER_OF_SIBLINGS];

/// The menu as rows of labels.
pub fn menu_rows() -> Vec<Vec<String>> {
    vec![
        vec![AGE.to_string(), FAVOURITE_COLOUR.to_string()],
        vec![NUMBER_OF_SIBLINGS.to_string(), SOMETHING_ELSE.to_string()],
        vec![DONE.to_string()],
    ]
}

/// Markup that shows the menu.
pub fn menu() -> ReplyMarkup {
    ReplyMarkup::Menu(menu_rows())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_layout() {
        let rows = menu_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Age", "Favourite colour"]);
        assert_eq!(rows[1], vec!["Number of siblings", "Something else..."]);
        assert_eq!(rows[2], vec!["Done"]);
    }

    #[test]
    fn test_menu_labels_cover_fixed_categories() {
        let markup = menu();
        let labels = markup.labels();
        for category in FIXED_CATEGORIES {
            assert!(labels.contains(&category));
        }
        assert!(labels.contains(&SOMETHING_ELSE));
        assert!(labels.contains(&DONE));
    }
}
