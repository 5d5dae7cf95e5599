use anyhow::Error;

use crate::models::Book;

/// Extract the most relevant error message from a chained error.
pub fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Render a heading followed by one line per book.
pub(crate) fn book_listing<'a>(heading: &str, books: impl IntoIterator<Item = &'a Book>) -> String {
    let mut listing = heading.to_string();
    for book in books {
        listing.push('\n');
        listing.push_str(&book.to_string());
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("disk full"))
            .context("failed to write store file")
            .unwrap_err();
        assert_eq!(surface_error(&err), "disk full");
    }

    #[test]
    fn listing_has_one_line_per_book() {
        let books = [
            Book::with_identity("A", "X", 1, Some("1".into()), None),
            Book::with_identity("B", "Y", 2, Some("2".into()), None),
        ];
        assert_eq!(
            book_listing("Found books:", &books),
            "Found books:\n1 A - X, 1 (in stock)\n2 B - Y, 2 (in stock)"
        );
    }
}
