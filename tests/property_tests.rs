//! Property-based tests for names.
//!
//! These tests use proptest to verify invariants hold for arbitrary inputs:
//! masking round-trips, both storages behave identically, and the
//! equality and hash contracts agree.

use namekit::core::escape;
use namekit::core::name::Name;
use namekit::core::tokenizer;
use namekit::core::types::{Delimiter, Representation};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Delimiters worth exercising, including letters and whitespace.
fn delimiter() -> impl Strategy<Value = Delimiter> {
    prop::sample::select(vec!['.', '/', '#', ':', ' ', 'a'])
        .prop_map(|c| Delimiter::new(c).unwrap())
}

/// Literal component text biased towards the characters that need masking.
fn literal() -> impl Strategy<Value = String> {
    let ch = prop_oneof![
        3 => prop::char::range('a', 'c'),
        1 => Just('.'),
        1 => Just('/'),
        1 => Just('\\'),
        1 => Just('#'),
        1 => Just('é'),
    ];
    prop::collection::vec(ch, 0..6).prop_map(|chars| chars.into_iter().collect())
}

fn literals() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(literal(), 1..6)
}

/// A masked component built directly, not through `mask`.
///
/// The escape character may precede any character, including ordinary ones
/// such as `\a`, which `mask` never produces.
fn masked_component(d: char) -> impl Strategy<Value = String> {
    let alphabet = vec!['a', 'b', '.', '/', '#', '\\', ' ', 'é'];
    let ordinary: Vec<char> = alphabet
        .iter()
        .copied()
        .filter(|&c| c != '\\' && c != d)
        .collect();
    let unit = prop_oneof![
        2 => prop::sample::select(ordinary).prop_map(String::from),
        1 => prop::sample::select(alphabet).prop_map(|c| format!("\\{c}")),
    ];
    prop::collection::vec(unit, 0..5).prop_map(|units| units.concat())
}

/// A delimiter with one to four directly masked components.
fn masked_name() -> impl Strategy<Value = (Delimiter, Vec<String>)> {
    delimiter().prop_flat_map(|d| {
        (
            Just(d),
            prop::collection::vec(masked_component(d.as_char()), 1..5),
        )
    })
}

fn representation() -> impl Strategy<Value = Representation> {
    prop::sample::select(Representation::ALL.to_vec())
}

/// The same content stored both ways.
fn both(literals: &[String], d: Delimiter) -> (Name, Name) {
    let array = Name::from_literals(literals, d).unwrap();
    let masked = array.components().unwrap();
    let joined = Name::parse(&tokenizer::join(&masked, d.as_char()), d).unwrap();
    (array, joined)
}

fn std_hash(name: &Name) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    /// Unmasking a masked string gives back the original.
    #[test]
    fn mask_round_trips(text in literal(), d in delimiter()) {
        let masked = escape::mask(&text, d.as_char());
        prop_assert!(escape::is_masked(&masked, d.as_char()));
        prop_assert_eq!(escape::unmask(&masked, d.as_char()), text);
    }

    /// Joining masked components and splitting again is lossless.
    #[test]
    fn split_inverts_join(literals in literals(), d in delimiter()) {
        let masked: Vec<String> = literals.iter().map(|l| escape::mask(l, d.as_char())).collect();
        let joined = tokenizer::join(&masked, d.as_char());
        prop_assert_eq!(tokenizer::split(&joined, d.as_char()).unwrap(), masked);
    }

    /// Both storages agree on every observable.
    #[test]
    fn storages_are_equivalent(literals in literals(), d in delimiter()) {
        let (array, joined) = both(&literals, d);

        prop_assert_eq!(array.representation(), Representation::Components);
        prop_assert_eq!(joined.representation(), Representation::Joined);
        prop_assert_eq!(array.no_components(), joined.no_components());
        prop_assert_eq!(array.components().unwrap(), joined.components().unwrap());
        prop_assert_eq!(array.as_string().unwrap(), joined.as_string().unwrap());
        prop_assert_eq!(array.as_data_string().unwrap(), joined.as_data_string().unwrap());
        prop_assert_eq!(array.hash_code().unwrap(), joined.hash_code().unwrap());
        prop_assert!(array.is_equal(&joined).unwrap());
        prop_assert_eq!(&array, &joined);
    }

    /// Both storages canonicalize any accepted component the same way.
    #[test]
    fn masked_components_hash_alike((d, components) in masked_name()) {
        for c in &components {
            prop_assert!(escape::is_masked(c, d.as_char()));
        }
        let array = Name::from_components(components.clone(), d).unwrap();
        let joined = Name::parse(&tokenizer::join(&components, d.as_char()), d).unwrap();

        prop_assert_eq!(&array, &joined);
        prop_assert_eq!(array.as_data_string().unwrap(), joined.as_data_string().unwrap());
        prop_assert_eq!(array.hash_code().unwrap(), joined.hash_code().unwrap());
        prop_assert_eq!(std_hash(&array), std_hash(&joined));

        let set: HashSet<Name> = [joined.clone()].into_iter().collect();
        prop_assert!(set.contains(&array));

        let converted = joined.with_representation(Representation::Components).unwrap();
        prop_assert_eq!(converted.hash_code().unwrap(), joined.hash_code().unwrap());
    }

    /// Converting storage never changes the name.
    #[test]
    fn with_representation_preserves_value(
        literals in literals(),
        d in delimiter(),
        kind in representation(),
    ) {
        let (array, joined) = both(&literals, d);
        let a = array.with_representation(kind).unwrap();
        let j = joined.with_representation(kind).unwrap();
        prop_assert_eq!(a.representation(), kind);
        prop_assert_eq!(&a, &array);
        prop_assert_eq!(&j, &joined);
    }

    /// Edits change the component count by exactly one and leave the
    /// receiver untouched.
    #[test]
    fn edits_adjust_count(
        literals in literals(),
        extra in literal(),
        d in delimiter(),
        kind in representation(),
        pick in any::<prop::sample::Index>(),
    ) {
        let name = Name::from_literals(&literals, d).unwrap().with_representation(kind).unwrap();
        let before = name.clone();
        let n = name.no_components();
        let c = escape::mask(&extra, d.as_char());

        prop_assert_eq!(name.append(&c).unwrap().no_components(), n + 1);
        prop_assert_eq!(name.insert(pick.index(n + 1), &c).unwrap().no_components(), n + 1);
        prop_assert_eq!(name.remove(pick.index(n)).unwrap().no_components(), n - 1);

        let set = name.set_component(pick.index(n), &c).unwrap();
        prop_assert_eq!(set.no_components(), n);
        prop_assert_eq!(set.component(pick.index(n)).unwrap(), c);

        prop_assert_eq!(&name, &before);
    }

    /// Equal names always hash alike.
    #[test]
    fn equality_implies_equal_hash(
        a in prop::collection::vec("[ab]{0,2}", 1..3),
        b in prop::collection::vec("[ab]{0,2}", 1..3),
        ka in representation(),
        kb in representation(),
    ) {
        let left = Name::from_literals(&a, Delimiter::DEFAULT).unwrap().with_representation(ka).unwrap();
        let right = Name::from_literals(&b, Delimiter::DEFAULT).unwrap().with_representation(kb).unwrap();

        prop_assert_eq!(left.is_equal(&right).unwrap(), a == b);
        if left == right {
            prop_assert_eq!(left.hash_code().unwrap(), right.hash_code().unwrap());
            prop_assert_eq!(std_hash(&left), std_hash(&right));
        }
    }

    /// Rendering with the default delimiter and re-parsing gives the same
    /// content back.
    #[test]
    fn default_rendering_reparses(literals in literals(), d in delimiter()) {
        prop_assume!(d != Delimiter::DEFAULT);
        let name = Name::from_literals(&literals, d).unwrap();

        let rendered = name.as_string_with(Delimiter::DEFAULT).unwrap();
        let reparsed = Name::parse(&rendered, Delimiter::DEFAULT).unwrap();

        prop_assert_eq!(reparsed.as_data_string().unwrap(), name.as_data_string().unwrap());
        let back: Vec<String> = reparsed
            .components()
            .unwrap()
            .iter()
            .map(|c| escape::unmask(c, '.'))
            .collect();
        prop_assert_eq!(back, literals);
    }

    /// The data string is a fixed point of parsing with `.`.
    #[test]
    fn data_string_is_canonical(literals in literals(), d in delimiter()) {
        let name = Name::from_literals(&literals, d).unwrap();
        let data = name.as_data_string().unwrap();

        let reparsed = Name::parse(&data, Delimiter::DEFAULT).unwrap();
        prop_assert_eq!(reparsed.no_components(), name.no_components());
        prop_assert_eq!(reparsed.as_data_string().unwrap(), data);
    }

    /// Serde preserves value and storage.
    #[test]
    fn serde_preserves_name(literals in literals(), d in delimiter(), kind in representation()) {
        let name = Name::from_literals(&literals, d).unwrap().with_representation(kind).unwrap();
        let json = serde_json::to_string(&name).unwrap();
        let parsed: Name = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed.representation(), kind);
        prop_assert_eq!(parsed, name);
    }
}
