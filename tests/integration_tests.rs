// Integration tests for tui-shorten

use tui_shorten::{
    generate_random_string, is_valid_url, EntryState, LinkList, ShortenError, DEFAULT_BASE_URL,
    SHORT_ID_LENGTH,
};

#[test]
fn test_validator_shapes() {
    // Accepted
    assert!(is_valid_url("https://example.com"));
    assert!(is_valid_url("https://a.co/x?y=1"));

    // Rejected
    assert!(!is_valid_url("ftp://example.com"));
    assert!(!is_valid_url("example.com"));
    assert!(!is_valid_url("https://no-dot"));
}

#[test]
fn test_generator_length_and_alphabet() {
    for length in [1, SHORT_ID_LENGTH, 32] {
        let token = generate_random_string(length);
        assert_eq!(token.len(), length);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}

#[test]
fn test_creation_flow() {
    let mut list = LinkList::new(DEFAULT_BASE_URL);

    // Invalid input surfaces the fixed message and leaves the list alone.
    let err = list.shorten("not a url").unwrap_err();
    assert_eq!(err, ShortenError::InvalidUrl);
    assert_eq!(err.to_string(), "Please enter a valid url");
    assert!(list.is_empty());

    // Valid input appends exactly one record.
    list.shorten("https://openai.com").unwrap();
    assert_eq!(list.len(), 1);

    let entry = &list.entries()[0];
    assert!(entry.short_url(list.base_url()).starts_with(DEFAULT_BASE_URL));
    assert_eq!(entry.original_url, "https://openai.com");
    assert_eq!(entry.clicks_label(), "");
}

#[test]
fn test_click_counters_are_independent() {
    let mut list = LinkList::new(DEFAULT_BASE_URL);
    list.shorten("https://one.example.com").unwrap();
    list.shorten("https://two.example.com").unwrap();

    for _ in 0..3 {
        list.entry_mut(0).unwrap().record_click();
    }

    assert_eq!(list.entries()[0].clicks_label(), " Clicks: 3");
    assert_eq!(list.entries()[1].clicks_label(), "");
}

#[test]
fn test_deletion_flows() {
    // Empty input clears the whole list.
    let mut list = LinkList::new(DEFAULT_BASE_URL);
    list.shorten("https://example.com").unwrap();
    list.shorten("https://other.example.com").unwrap();
    assert_eq!(list.delete_matching(""), 2);
    assert!(list.is_empty());

    // An original URL removes its duplicates and nothing else.
    let mut list = LinkList::new(DEFAULT_BASE_URL);
    list.shorten("https://example.com").unwrap();
    list.shorten("https://other.example.com").unwrap();
    list.shorten("https://example.com").unwrap();
    assert_eq!(list.delete_matching("https://example.com"), 2);
    assert_eq!(list.len(), 1);

    // A short URL removes exactly the record that carries it.
    let target = list.entries()[0].short_url(list.base_url());
    assert_eq!(list.delete_matching(&target), 1);
    assert!(list.is_empty());
}

#[test]
fn test_edit_toggle_round_trip() {
    let mut list = LinkList::new(DEFAULT_BASE_URL);
    list.shorten("https://example.com").unwrap();
    let before = list.entries()[0].short_url(DEFAULT_BASE_URL);

    let entry = list.entry_mut(0).unwrap();
    entry.record_click();
    entry.begin_edit();
    assert!(entry.is_editing());
    entry.save_edit();

    // Saving the pre-filled value reproduces the short URL exactly and
    // keeps the counter.
    assert_eq!(entry.state, EntryState::Viewing);
    assert_eq!(entry.short_url(DEFAULT_BASE_URL), before);
    assert_eq!(entry.clicks, 1);
}

#[test]
fn test_edit_accepts_arbitrary_text() {
    let mut list = LinkList::new(DEFAULT_BASE_URL);
    list.shorten("https://example.com").unwrap();

    let entry = list.entry_mut(0).unwrap();
    entry.begin_edit();
    *entry.edit_buffer_mut().unwrap() = "totally/custom alias!".to_string();
    entry.save_edit();

    assert_eq!(
        entry.short_url(DEFAULT_BASE_URL),
        "localhost/totally/custom alias!"
    );
    assert_eq!(entry.original_url, "https://example.com");
}
