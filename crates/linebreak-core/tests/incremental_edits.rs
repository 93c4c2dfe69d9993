use linebreak_core::{
    BreakClassifier, CellTextMeasurer, LineBreakMeasurer, MeasureError, Paragraph, TextMeasurer,
};
use pretty_assertions::assert_eq;

fn lines(lbm: &mut LineBreakMeasurer<CellTextMeasurer>, width: f32) -> Vec<String> {
    lbm.layouts(width).map(|line| line.text).collect()
}

fn fresh(paragraph: &Paragraph) -> LineBreakMeasurer<CellTextMeasurer> {
    LineBreakMeasurer::new(paragraph, CellTextMeasurer::new(paragraph)).unwrap()
}

#[test]
fn test_insert_resets_position_and_rewraps() {
    let paragraph = Paragraph::new("The quick fox");
    let mut lbm = fresh(&paragraph);
    lbm.next_layout(7.0).unwrap();
    assert_eq!(lbm.position(), 4);

    let edited = paragraph.with_inserted(4, 'X').unwrap();
    lbm.insert_char(&edited, 4).unwrap();

    assert_eq!(lbm.position(), 0);
    assert_eq!(lbm.paragraph_start(), 0);
    assert_eq!(lbm.paragraph_limit(), 14);
    assert_eq!(lines(&mut lbm, 7.0), lines(&mut fresh(&edited), 7.0));
}

#[test]
fn test_delete_resets_position_and_rewraps() {
    let paragraph = Paragraph::with_begin("aa bb cc", 5);
    let mut lbm = fresh(&paragraph);
    lbm.next_layout(3.0).unwrap();

    // Remove the first space: "aabb cc".
    let edited = paragraph.with_deleted(7).unwrap();
    lbm.delete_char(&edited, 7).unwrap();

    assert_eq!(lbm.position(), 5);
    assert_eq!(lbm.paragraph_limit(), 12);
    assert_eq!(lbm.next_offset(5.0), 10);
    assert_eq!(lines(&mut lbm, 5.0), vec!["aabb ", "cc"]);
}

#[test]
fn test_edit_behaves_like_fresh_construction() {
    let mut paragraph = Paragraph::new("lorem ipsum dolor sit amet");
    let mut lbm = fresh(&paragraph);

    let edits: [(bool, usize, char); 6] = [
        (true, 5, '-'),
        (true, 0, '你'),
        (false, 3, ' '),
        (true, 26, '!'),
        (false, 0, ' '),
        (true, 12, ' '),
    ];

    for (insert, offset, ch) in edits {
        lbm.next_layout(6.0);
        if insert {
            paragraph = paragraph.with_inserted(offset, ch).unwrap();
            lbm.insert_char(&paragraph, offset).unwrap();
        } else {
            paragraph = paragraph.with_deleted(offset).unwrap();
            lbm.delete_char(&paragraph, offset).unwrap();
        }

        assert_eq!(&*lbm.measurer().characters(), &paragraph.chars()[..]);
        for width in [1.0, 4.0, 6.0, 9.0] {
            lbm.set_position(paragraph.begin_index()).unwrap();
            assert_eq!(
                lines(&mut lbm, width),
                lines(&mut fresh(&paragraph), width),
                "mismatch after edit at {offset} for width {width}"
            );
        }
    }
}

#[test]
fn test_classifier_is_rebound_to_the_new_text() {
    let paragraph = Paragraph::new("ab cd");
    let mut lbm = fresh(&paragraph);

    let edited = paragraph.with_deleted(2).unwrap();
    lbm.delete_char(&edited, 2).unwrap();

    let text = lbm.classifier().text();
    assert_eq!(text.end_index(), 4);
    assert_eq!(text.char_at(2), Some('c'));
    // "abcd" is a single word now, so the fallback forces progress.
    assert_eq!(lbm.next_offset(3.0), 3);
}

#[test]
fn test_deleting_the_last_char_is_accepted() {
    let paragraph = Paragraph::new("ab cd");
    let mut lbm = fresh(&paragraph);
    lbm.next_layout(3.0).unwrap();

    let edited = paragraph.with_deleted(4).unwrap();
    assert_eq!(edited.end_index(), 4);
    lbm.delete_char(&edited, 4).unwrap();

    assert_eq!(lbm.position(), 0);
    assert_eq!(lbm.paragraph_limit(), 4);
    assert_eq!(lines(&mut lbm, 3.0), vec!["ab ", "c"]);
    assert_eq!(lines(&mut fresh(&edited), 3.0), vec!["ab ", "c"]);
}

#[test]
fn test_delete_outside_the_paragraph_is_rejected() {
    let paragraph = Paragraph::new("ab cd");
    let edited = paragraph.with_deleted(4).unwrap();
    let mut lbm = fresh(&paragraph);
    lbm.set_position(3).unwrap();

    assert_eq!(
        lbm.delete_char(&edited, edited.end_index() + 1),
        Err(MeasureError::EditOutOfRange {
            offset: 5,
            begin: 0,
            end: 4
        })
    );
    assert_eq!(lbm.position(), 3);
    assert_eq!(lbm.paragraph_limit(), 5);
    assert_eq!(lbm.measurer().paragraph().text(), "ab cd");

    let shifted = Paragraph::with_begin("ab cd", 10);
    let edited = shifted.with_deleted(10).unwrap();
    let mut lbm = fresh(&shifted);
    assert_eq!(
        lbm.delete_char(&edited, 9),
        Err(MeasureError::EditOutOfRange {
            offset: 9,
            begin: 10,
            end: 14
        })
    );
    assert_eq!(lbm.paragraph_start(), 10);
    assert_eq!(lbm.measurer().paragraph().text(), "ab cd");
}

#[test]
fn test_invalid_edits_leave_state_untouched() {
    let paragraph = Paragraph::new("abc");
    let mut lbm = fresh(&paragraph);
    lbm.set_position(2).unwrap();

    let edited = paragraph.with_inserted(3, 'd').unwrap();
    assert_eq!(
        lbm.insert_char(&edited, 4),
        Err(MeasureError::EditOutOfRange {
            offset: 4,
            begin: 0,
            end: 4
        })
    );
    assert_eq!(
        lbm.insert_char(&Paragraph::new(""), 0),
        Err(MeasureError::EmptyParagraph)
    );

    let single = Paragraph::new("a");
    let mut one = fresh(&single);
    let emptied = single.with_deleted(0).unwrap();
    assert_eq!(one.delete_char(&emptied, 0), Err(MeasureError::EmptyParagraph));
    assert_eq!(one.paragraph_limit(), 1);

    assert_eq!(lbm.position(), 2);
    assert_eq!(lbm.paragraph_limit(), 3);
    assert_eq!(lbm.measurer().paragraph().text(), "abc");
}
