use masked_text::{MaskError, Tag, TaggedText};

#[test]
fn test_new() {
    let t = TaggedText::new();
    assert_eq!(t.as_str(), "");
    assert_eq!(t.len(), 0);
    assert!(t.is_empty());

    let t = TaggedText::new_text("abc", Tag::User);
    assert_eq!(t.string(), "abc");
    assert_eq!(t.len(), 3);
    assert_eq!(t.tag_at(0), Ok(Tag::User));
    assert_eq!(t.tag_at(2), Ok(Tag::User));
}

#[test]
fn test_insert() {
    let mut t = TaggedText::new();
    t.insert_char(0, 'a', Tag::User).unwrap();
    t.insert_char(1, 'c', Tag::User).unwrap();
    t.insert_char(1, 'b', Tag::Placeholder).unwrap();
    assert_eq!(t.string(), "abc");
    assert_eq!(t.tag_at(0), Ok(Tag::User));
    assert_eq!(t.tag_at(1), Ok(Tag::Placeholder));
    assert_eq!(t.tag_at(2), Ok(Tag::User));

    t.insert_str(3, "de", Tag::Literal).unwrap();
    assert_eq!(t.string(), "abcde");
    assert_eq!(t.len(), 5);
    assert_eq!(t.tag_at(3), Ok(Tag::Literal));
    assert_eq!(t.tag_at(4), Ok(Tag::Literal));
}

#[test]
fn test_insert_unicode() {
    let mut t = TaggedText::new_text("äöü", Tag::User);
    assert_eq!(t.len(), 3);

    t.insert_char(1, 'ß', Tag::Placeholder).unwrap();
    assert_eq!(t.string(), "äßöü");
    assert_eq!(t.len(), 4);
    assert_eq!(t.grapheme_at(0).unwrap(), "ä");
    assert_eq!(t.grapheme_at(1).unwrap(), "ß");
    assert_eq!(t.grapheme_at(3).unwrap(), "ü");

    t.remove_at(1).unwrap();
    assert_eq!(t.string(), "äöü");
    assert_eq!(t.len(), 3);
    assert_eq!(t.tag_at(1), Ok(Tag::User));
}

#[test]
fn test_remove() {
    let mut t = TaggedText::new_text("abcde", Tag::User);
    let r = t.remove_range(1..3).unwrap();
    assert_eq!(r, "bc");
    assert_eq!(t.string(), "ade");
    assert_eq!(t.len(), 3);

    t.remove_at(2).unwrap();
    assert_eq!(t.string(), "ad");

    let r = t.remove_range(0..0).unwrap();
    assert_eq!(r, "");
    assert_eq!(t.string(), "ad");
}

#[test]
fn test_raw() {
    let mut t = TaggedText::new();
    t.insert_char(0, '(', Tag::Literal).unwrap();
    t.insert_char(1, '5', Tag::User).unwrap();
    t.insert_char(2, ' ', Tag::Placeholder).unwrap();
    t.insert_char(3, ')', Tag::Literal).unwrap();
    t.insert_char(4, '3', Tag::User).unwrap();
    assert_eq!(t.string(), "(5 )3");
    assert_eq!(t.raw(), "53");

    let tags = t.graphemes().map(|(_, tag)| tag).collect::<Vec<_>>();
    assert_eq!(
        tags,
        vec![
            Tag::Literal,
            Tag::User,
            Tag::Placeholder,
            Tag::Literal,
            Tag::User
        ]
    );
}

#[test]
fn test_bounds() {
    let mut t = TaggedText::new_text("abc", Tag::User);

    assert_eq!(t.tag_at(3), Err(MaskError::PositionOutOfBounds(3, 3)));
    assert_eq!(
        t.grapheme_at(3).unwrap_err(),
        MaskError::PositionOutOfBounds(3, 3)
    );
    assert_eq!(
        t.insert_char(4, 'x', Tag::User).unwrap_err(),
        MaskError::PositionOutOfBounds(4, 3)
    );
    assert_eq!(
        t.remove_range(1..4).unwrap_err(),
        MaskError::RangeOutOfBounds(1, 4, 3)
    );
    assert_eq!(
        t.remove_at(3).unwrap_err(),
        MaskError::PositionOutOfBounds(3, 3)
    );

    // insert at the very end is fine
    t.insert_char(3, 'd', Tag::User).unwrap();
    assert_eq!(t.string(), "abcd");
}
