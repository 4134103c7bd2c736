//! Tests for the `DynString` value type.
//!
//! Exercises construction, conversion, search, mutation, comparison,
//! formatting and iteration, with multi-byte text throughout.

use std::cmp::Ordering;

use dynstr::{Charset, DynString, FormatArg};

fn latin1() -> Charset {
    Charset::new("latin1").unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn new_defaults_to_utf8() {
    let s = DynString::new("test");
    assert_eq!(s.charset().name(), "UTF-8");
    assert_eq!(s.to_text(), "test");
}

#[test]
fn from_bytes_validates_against_the_charset() {
    let s = DynString::from_bytes("tääst".as_bytes().to_vec(), Charset::utf8()).unwrap();
    assert_eq!(s.char_len(), 5);

    // Latin-1 umlaut bytes are not valid UTF-8.
    assert!(DynString::from_bytes(b"t\xE4\xE4st".to_vec(), Charset::utf8()).is_err());
    // The same bytes are fine when declared as Latin-1.
    let s = DynString::from_bytes(b"t\xE4\xE4st".to_vec(), latin1()).unwrap();
    assert_eq!(s.to_text(), "tääst");
}

#[test]
fn with_charset_accepts_aliases() {
    let s = DynString::with_charset("test", "latin1").unwrap();
    assert_eq!(s.charset().name(), "ISO-8859-1");
}

#[test]
fn with_charset_rejects_unknown_names() {
    assert!(DynString::with_charset("test", "an-invalid-charset").is_err());
}

#[test]
fn from_str_and_collect_produce_utf8_strings() {
    let s: DynString = "hällo".into();
    assert_eq!(s.to_text(), "hällo");

    let collected: DynString = "hällo".chars().collect();
    assert_eq!(collected, s);
}

// =============================================================================
// Conversion
// =============================================================================

#[test]
fn convert_to_changes_charset_and_bytes() {
    let mut s = DynString::new("tääst");
    assert_eq!(s.len(), 7);
    s.convert_to("latin1").unwrap();
    assert_eq!(s.charset().name(), "ISO-8859-1");
    assert_eq!(s.len(), 5);
    assert_eq!(s.char_len(), 5);
    assert_eq!(s.to_text(), "tääst");
}

#[test]
fn convert_to_same_charset_is_a_noop() {
    let mut s = DynString::new("tääst");
    let ptr = s.as_bytes().as_ptr();
    s.convert_to("utf8").unwrap();
    // The buffer was not even reallocated.
    assert_eq!(s.as_bytes().as_ptr(), ptr);
    assert_eq!(s.charset().name(), "UTF-8");
}

#[test]
fn convert_to_transliterates_unrepresentable_characters() {
    let mut s = DynString::new("one test for 10€");
    s.convert_to("latin1").unwrap();
    // The euro sign must not be silently discarded.
    let text = s.to_text();
    assert!(!text.ends_with("10"));
    assert!(text.ends_with("10EUR"));
}

#[test]
fn convert_to_substitutes_when_no_fold_exists() {
    let mut s = DynString::new("a中b");
    s.convert_to("ascii").unwrap();
    assert_eq!(s.to_text(), "a?b");
}

#[test]
fn convert_to_rejects_unknown_charsets() {
    let mut s = DynString::new("test");
    assert!(s.convert_to("an-invalid-charset").is_err());
    // A failed conversion leaves the string untouched.
    assert_eq!(s.charset().name(), "UTF-8");
    assert_eq!(s.to_text(), "test");
}

#[test]
fn convert_roundtrip_preserves_text() {
    let mut s = DynString::new("tääst");
    s.convert_to("latin1").unwrap();
    s.convert_to("utf8").unwrap();
    assert_eq!(s.to_text(), "tääst");
    assert_eq!(s.len(), 7);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn index_of_finds_the_first_occurrence() {
    let s = DynString::new("a b c a");
    assert_eq!(s.index_of("a"), Some(0));
    assert_eq!(s.index_of("c"), Some(4));
    assert_eq!(s.index_of("missing"), None);
}

#[test]
fn index_of_counts_characters_not_bytes() {
    let s = DynString::new("tääst");
    assert_eq!(s.index_of("st"), Some(3));
    assert_eq!(s.index_of("ä"), Some(1));
}

#[test]
fn index_of_on_empty_string_finds_nothing() {
    let s = DynString::new("");
    assert_eq!(s.index_of("a"), None);
}

#[test]
fn index_of_from_skips_earlier_matches() {
    let s = DynString::new("a b c a");
    assert_eq!(s.index_of_from("a", 1), Some(6));
    assert_eq!(s.index_of_from("a", 7), None);
    // Offsets beyond the end never match.
    assert_eq!(s.index_of_from("a", 100), None);
}

#[test]
fn index_of_accepts_string_objects_in_other_charsets() {
    let haystack = DynString::new("bär");
    let needle = DynString::with_charset("ä", "latin1").unwrap();
    assert_eq!(haystack.index_of(&needle), Some(1));
}

#[test]
fn last_index_of_searches_from_the_right() {
    let s = DynString::new("hello");
    assert_eq!(s.last_index_of("l"), Some(3));
    assert_eq!(s.last_index_of("missing"), None);
}

#[test]
fn last_index_of_from_includes_the_character_at_the_offset() {
    let s = DynString::new("hello");
    assert_eq!(s.last_index_of_from("l", 2), Some(2));
    assert_eq!(s.last_index_of_from("l", 1), None);
}

#[test]
fn last_index_of_handles_multibyte_characters() {
    let s = DynString::new("äbäb");
    assert_eq!(s.last_index_of("ä"), Some(2));
    assert_eq!(s.last_index_of_from("ä", 1), Some(0));
}

#[test]
fn indexes_of_returns_ascending_indices() {
    let s = DynString::new("a b c a b c");
    assert_eq!(s.indexes_of("b"), vec![2, 8]);
    assert_eq!(s.indexes_of("missing"), Vec::<usize>::new());
}

#[test]
fn indexes_of_reports_overlapping_matches() {
    let s = DynString::new("aaa");
    assert_eq!(s.indexes_of("aa"), vec![0, 1]);
}

#[test]
fn indexes_of_with_empty_needle_terminates_empty() {
    let s = DynString::new("abc");
    assert_eq!(s.indexes_of(""), Vec::<usize>::new());
}

#[test]
fn starts_with_checks_the_boundary() {
    let s = DynString::new("this is a test string");
    assert!(s.starts_with("this"));
    assert!(!s.starts_with("test"));
    assert!(!s.starts_with("demo"));
    // Shorter than the prefix.
    assert!(!DynString::new("test").starts_with("testprefix"));
}

#[test]
fn ends_with_checks_the_boundary() {
    let s = DynString::new("this is a test string");
    assert!(s.ends_with("string"));
    assert!(!s.ends_with("test"));
    assert!(s.ends_with(&DynString::new("string")));
}

#[test]
fn contains_agrees_with_index_of() {
    let s = DynString::new("tääst");
    for needle in ["t", "ää", "st", "x", "", "tääst!"] {
        assert_eq!(s.contains(needle), s.index_of(needle).is_some());
    }
}

#[test]
fn contains_any_is_vacuously_true_for_no_needles() {
    let s = DynString::new("abc");
    assert!(s.contains_any::<&str>(&[]));
    assert!(s.contains_any(&["x", "b"]));
    assert!(!s.contains_any(&["x", "y"]));
}

#[test]
fn contains_all_is_vacuously_true_for_no_needles() {
    let s = DynString::new("abc");
    assert!(s.contains_all::<&str>(&[]));
    assert!(s.contains_all(&["a", "c"]));
    assert!(!s.contains_all(&["a", "x"]));
}

// =============================================================================
// Prefix / suffix removal
// =============================================================================

#[test]
fn remove_prefix_strips_one_occurrence() {
    let mut s = DynString::new("testtestdemo");
    s.remove_prefix("test");
    assert_eq!(s.to_text(), "testdemo");
}

#[test]
fn remove_prefix_ignores_interior_matches() {
    let mut s = DynString::new("this is a test string");
    s.remove_prefix("test");
    assert_eq!(s.to_text(), "this is a test string");
}

#[test]
fn remove_suffix_strips_one_occurrence() {
    let mut s = DynString::new("demotesttest");
    s.remove_suffix("test");
    assert_eq!(s.to_text(), "demotest");
}

#[test]
fn remove_suffix_ignores_interior_matches() {
    let mut s = DynString::new("this is a test string");
    s.remove_suffix("test");
    assert_eq!(s.to_text(), "this is a test string");
}

// =============================================================================
// Replace
// =============================================================================

#[test]
fn replace_substitutes_every_occurrence() {
    let mut s = DynString::new("a-b-c");
    s.replace("-", "+");
    assert_eq!(s.to_text(), "a+b+c");
}

#[test]
fn replace_without_a_match_changes_nothing() {
    let mut s = DynString::new("hello");
    let ptr = s.as_bytes().as_ptr();
    s.replace("xyz", "!");
    assert_eq!(s.to_text(), "hello");
    assert_eq!(s.as_bytes().as_ptr(), ptr);
}

#[test]
fn replace_any_applies_one_replacement_to_many_needles() {
    let mut s = DynString::new("first and second");
    s.replace_any(&["first", "second"], "x");
    assert_eq!(s.to_text(), "x and x");
}

#[test]
fn replace_pairs_applies_a_mapping() {
    let mut s = DynString::new("hello first");
    s.replace_pairs(&[("first", "last"), ("hello", "world")]);
    assert_eq!(s.to_text(), "world last");
}

#[test]
fn replace_pairs_swaps_without_cascading() {
    let mut s = DynString::new("ab");
    s.replace_pairs(&[("a", "b"), ("b", "a")]);
    assert_eq!(s.to_text(), "ba");
}

#[test]
fn replace_never_rescans_substituted_text() {
    let mut s = DynString::new("aa");
    s.replace("a", "aa");
    assert_eq!(s.to_text(), "aaaa");
}

#[test]
fn replace_earlier_pairs_win_at_each_position() {
    let mut s = DynString::new("abc");
    s.replace_pairs(&[("ab", "1"), ("a", "2")]);
    assert_eq!(s.to_text(), "1c");
}

#[test]
fn replace_handles_multibyte_needles() {
    let mut s = DynString::new("tääst");
    s.replace("ää", "e");
    assert_eq!(s.to_text(), "test");
}

#[test]
fn replace_accepts_string_objects() {
    let mut s = DynString::new("hello world");
    s.replace(&DynString::new("world"), &DynString::new("there"));
    assert_eq!(s.to_text(), "hello there");
}

// =============================================================================
// Substring
// =============================================================================

#[test]
fn sub_string_extracts_the_requested_characters() {
    let s = DynString::new("this is a test string");
    assert_eq!(s.sub_string(10, Some(4)).to_text(), "test");
}

#[test]
fn sub_string_extends_to_the_end_without_length() {
    let s = DynString::new("täst täst");
    assert_eq!(s.sub_string(5, None).to_text(), "täst");
}

#[test]
fn sub_string_clamps_excess_length() {
    let s = DynString::new("abcdef");
    assert_eq!(s.sub_string(4, Some(1000)).to_text(), "ef");
    assert_eq!(s.sub_string(100, Some(5)).to_text(), "");
}

#[test]
fn sub_string_of_zero_equals_the_original() {
    let s = DynString::new("tääst");
    let copy = s.sub_string(0, None);
    assert!(s.equals(&copy));
    assert_eq!(copy.charset(), s.charset());
}

#[test]
fn sub_string_does_not_modify_the_original() {
    let s = DynString::new("abcdef");
    let _ = s.sub_string(2, Some(2));
    assert_eq!(s.to_text(), "abcdef");
}

// =============================================================================
// Case mapping
// =============================================================================

#[test]
fn to_upper_case_maps_every_character() {
    let mut s = DynString::new("aBc");
    assert_eq!(s.to_upper_case().to_text(), "ABC");
}

#[test]
fn case_mapping_handles_umlauts() {
    let mut s = DynString::new("äÖü");
    assert_eq!(s.to_upper_case().to_text(), "ÄÖÜ");

    let mut s = DynString::new("ÄöÜ");
    assert_eq!(s.to_lower_case().to_text(), "äöü");
}

#[test]
fn case_mapping_works_in_single_byte_charsets() {
    let mut s = DynString::with_charset("äÖü", "latin1").unwrap();
    s.to_upper_case();
    assert_eq!(s.to_text(), "ÄÖÜ");
    assert_eq!(s.len(), 3);
}

#[test]
fn upper_case_expands_sharp_s() {
    let mut s = DynString::new("straße");
    assert_eq!(s.to_upper_case().to_text(), "STRASSE");
    assert_eq!(s.char_len(), 7);
}

// =============================================================================
// Trim
// =============================================================================

#[test]
fn trim_strips_whitespace_from_both_ends() {
    let mut s = DynString::new("  abc\t\n");
    assert_eq!(s.trim(None).to_text(), "abc");
}

#[test]
fn trim_strips_only_the_provided_characters() {
    let mut s = DynString::new("aabcbaa");
    assert_eq!(s.trim(Some("a")).to_text(), "bcb");
}

#[test]
fn trim_left_leaves_the_end_alone() {
    let mut s = DynString::new(" abc ");
    assert_eq!(s.trim_left(None).to_text(), "abc ");
}

#[test]
fn trim_right_leaves_the_start_alone() {
    let mut s = DynString::new(" abc ");
    assert_eq!(s.trim_right(None).to_text(), " abc");
}

#[test]
fn trim_handles_multibyte_characters() {
    let mut s = DynString::new("ääbää");
    assert_eq!(s.trim(Some("ä")).to_text(), "b");
}

// =============================================================================
// Reverse & concat
// =============================================================================

#[test]
fn reverse_reorders_characters_not_bytes() {
    let mut s = DynString::new("äbü");
    assert_eq!(s.reverse().to_text(), "übä");
}

#[test]
fn reverse_twice_restores_the_original() {
    let mut s = DynString::new("tääst 世界");
    let original = s.clone();
    s.reverse().reverse();
    assert!(s.equals(&original));
}

#[test]
fn concat_appends_converted_text() {
    let mut s = DynString::with_charset("ab", "latin1").unwrap();
    s.concat("cä");
    assert_eq!(s.to_text(), "abcä");
    assert_eq!(s.len(), 4);
}

#[test]
fn concat_of_empty_text_is_a_noop() {
    let mut s = DynString::new("ab");
    let ptr = s.as_bytes().as_ptr();
    s.concat("");
    assert_eq!(s.as_bytes().as_ptr(), ptr);
    assert_eq!(s.to_text(), "ab");
}

#[test]
fn mutators_chain() {
    let mut s = DynString::new("  hello  ");
    s.trim(None).to_upper_case().concat("!");
    assert_eq!(s.to_text(), "HELLO!");
}

// =============================================================================
// Split
// =============================================================================

#[test]
fn split_cuts_at_every_delimiter() {
    let s = DynString::new("a b c");
    assert_eq!(s.split(" ", None), vec!["a", "b", "c"]);
}

#[test]
fn split_with_limit_keeps_the_remainder_in_the_last_part() {
    let s = DynString::new("a b c");
    assert_eq!(s.split(" ", Some(2)), vec!["a", "b c"]);
    assert_eq!(s.split(" ", Some(1)), vec!["a b c"]);
}

#[test]
fn split_without_a_match_returns_the_whole_string() {
    let s = DynString::new("abc");
    assert_eq!(s.split("-", None), vec!["abc"]);
}

#[test]
fn split_keeps_empty_trailing_parts() {
    let s = DynString::new("a,b,");
    assert_eq!(s.split(",", None), vec!["a", "b", ""]);
}

#[test]
fn split_handles_multibyte_delimiters() {
    let s = DynString::new("aäbäc");
    assert_eq!(s.split("ä", None), vec!["a", "b", "c"]);
}

// =============================================================================
// Indexed access
// =============================================================================

#[test]
fn char_at_returns_the_decoded_character() {
    let s = DynString::new("täst");
    assert_eq!(s.char_at(0).unwrap(), 't');
    assert_eq!(s.char_at(1).unwrap(), 'ä');
    assert_eq!(s.char_at(3).unwrap(), 't');
}

#[test]
fn char_at_rejects_out_of_range_indices() {
    let s = DynString::new("täst");
    let before = s.as_bytes().to_vec();
    let err = s.char_at(4).unwrap_err();
    assert_eq!(err.index(), 4);
    assert_eq!(err.len(), 4);
    // A failed access leaves the bytes untouched.
    assert_eq!(s.as_bytes(), &before[..]);
}

#[test]
fn char_slice_at_returns_the_raw_bytes() {
    let s = DynString::new("täst");
    assert_eq!(s.char_slice_at(1).unwrap(), "ä".as_bytes());
    assert!(s.char_slice_at(9).is_err());
}

#[test]
fn set_char_overwrites_one_character() {
    let mut s = DynString::new("täst");
    s.set_char(1, "e").unwrap();
    assert_eq!(s.to_text(), "test");
}

#[test]
fn set_char_accepts_multicharacter_values() {
    let mut s = DynString::new("abc");
    s.set_char(1, "xyz").unwrap();
    assert_eq!(s.to_text(), "axyzc");
    assert_eq!(s.char_len(), 5);
}

#[test]
fn set_char_checks_bounds_before_mutating() {
    let mut s = DynString::new("abc");
    let before = s.as_bytes().to_vec();
    assert!(s.set_char(3, "x").is_err());
    assert_eq!(s.as_bytes(), &before[..]);
}

#[test]
fn delete_char_is_unsupported() {
    let mut s = DynString::new("abc");
    let err = s.delete_char(1).unwrap_err();
    assert!(err.to_string().contains("not supported"));
    assert_eq!(s.to_text(), "abc");
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn equals_compares_exact_bytes_after_conversion() {
    let s = DynString::new("tääst");
    assert!(s.equals("tääst"));
    assert!(!s.equals("taast"));
}

#[test]
fn same_text_in_different_charsets_compares_equal() {
    let a = DynString::new("tääst");
    let mut b = a.clone();
    b.convert_to("latin1").unwrap();

    assert!(a.equals(&b));
    assert!(b.equals(&a));
    assert_eq!(a.compare_to(&b), Ordering::Equal);
    assert_eq!(a, b);
}

#[test]
fn compare_to_orders_byte_lexicographically() {
    let s = DynString::new("b");
    assert_eq!(s.compare_to("a"), Ordering::Greater);
    assert_eq!(s.compare_to("c"), Ordering::Less);
    assert_eq!(s.compare_to("b"), Ordering::Equal);
}

// =============================================================================
// Length
// =============================================================================

#[test]
fn char_len_counts_characters_and_len_counts_bytes() {
    let s = DynString::new("tääst");
    assert_eq!(s.char_len(), 5);
    assert_eq!(s.len(), 7);
    assert!(s.len() >= s.char_len());
}

#[test]
fn single_byte_charsets_have_equal_lengths() {
    let s = DynString::with_charset("tääst", "latin1").unwrap();
    assert_eq!(s.len(), s.char_len());
}

#[test]
fn is_empty_reflects_the_character_count() {
    assert!(DynString::new("").is_empty());
    assert!(!DynString::new("a").is_empty());
    assert_eq!(DynString::new("").char_len(), 0);
}

// =============================================================================
// Digest
// =============================================================================

#[test]
fn hash_code_md5_matches_the_known_vector() {
    let s = DynString::new("test");
    let digest = s.hash_code("md5").unwrap();
    assert_eq!(digest.to_text(), "098f6bcd4621d373cade4e832627b4f6");
    // The digest is a fresh value; the original is untouched.
    assert_eq!(s.to_text(), "test");
    assert_eq!(digest.charset().name(), "UTF-8");
}

#[test]
fn hash_code_supports_sha_algorithms() {
    let s = DynString::new("test");
    assert_eq!(
        s.hash_code("sha1").unwrap().to_text(),
        "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3"
    );
    assert_eq!(
        s.hash_code("sha256").unwrap().to_text(),
        "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
    );
}

#[test]
fn hash_code_digests_the_raw_bytes() {
    // The same text in different charsets has different bytes, hence
    // different digests.
    let utf8 = DynString::new("tääst");
    let mut converted = utf8.clone();
    converted.convert_to("latin1").unwrap();
    assert_ne!(
        utf8.hash_code("md5").unwrap().to_text(),
        converted.hash_code("md5").unwrap().to_text()
    );
}

#[test]
fn hash_code_rejects_unknown_algorithms() {
    let s = DynString::new("test");
    assert!(s.hash_code("crc1337").is_err());
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn format_substitutes_positional_arguments() {
    let s = DynString::format(
        "%s has %d items",
        &[FormatArg::from("cart"), FormatArg::from(3_i32)],
        None,
    )
    .unwrap();
    assert_eq!(s.to_text(), "cart has 3 items");
    assert_eq!(s.charset().name(), "UTF-8");
}

#[test]
fn format_fails_on_missing_arguments() {
    let err = DynString::format("%s and %s", &[FormatArg::from("one")], None).unwrap_err();
    assert!(err.to_string().contains('2'));
}

#[test]
fn format_encodes_into_the_requested_charset() {
    let s = DynString::format("%s", &[FormatArg::from("10€")], Some(latin1())).unwrap();
    assert_eq!(s.charset().name(), "ISO-8859-1");
    assert_eq!(s.to_text(), "10EUR");
}

#[test]
fn format_accepts_string_objects_as_arguments() {
    let name = DynString::with_charset("wörld", "latin1").unwrap();
    let s = DynString::format("hello %s", &[FormatArg::from(&name)], None).unwrap();
    assert_eq!(s.to_text(), "hello wörld");
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn chars_yields_decoded_characters_in_order() {
    let s = DynString::new("äbcü");
    let chars: Vec<char> = s.chars().collect();
    assert_eq!(chars, vec!['ä', 'b', 'c', 'ü']);
}

#[test]
fn every_iteration_is_an_independent_traversal() {
    let s = DynString::new("abc");
    let mut first = s.chars();
    assert_eq!(first.next(), Some('a'));
    // A second traversal starts from the beginning regardless.
    let second: Vec<char> = s.chars().collect();
    assert_eq!(second, vec!['a', 'b', 'c']);
    assert_eq!(first.next(), Some('b'));
}

#[test]
fn chars_iterates_backwards_too() {
    let s = DynString::new("äbc");
    let reversed: Vec<char> = s.chars().rev().collect();
    assert_eq!(reversed, vec!['c', 'b', 'ä']);
}

#[test]
fn char_slices_cover_the_buffer_exactly() {
    let s = DynString::new("täst");
    let slices: Vec<&[u8]> = s.char_slices().collect();
    assert_eq!(slices.len(), s.char_len());
    let total: usize = slices.iter().map(|slice| slice.len()).sum();
    assert_eq!(total, s.len());
}

#[test]
fn into_iterator_on_references_yields_chars() {
    let s = DynString::new("ab");
    let mut collected = Vec::new();
    for c in &s {
        collected.push(c);
    }
    assert_eq!(collected, vec!['a', 'b']);
}

#[test]
fn display_renders_the_decoded_text() {
    let s = DynString::with_charset("tääst", "latin1").unwrap();
    assert_eq!(format!("{s}"), "tääst");
    assert_eq!(s.to_string(), "tääst");
}
