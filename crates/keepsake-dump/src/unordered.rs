//! Canonical ordering for unordered collections.
//!
//! serde presents a `HashSet` as a plain sequence in hash iteration order, so
//! two equal sets can serialize differently. These helpers sort the elements
//! first, using the same order map keys get.
//!
//! ```
//! use keepsake_dump::{dump, DumpMode, Item};
//! use serde::Serialize;
//! use std::collections::HashSet;
//!
//! #[derive(Serialize)]
//! struct Team {
//!     #[serde(serialize_with = "keepsake_dump::unordered")]
//!     members: HashSet<String>,
//! }
//!
//! let team = Team {
//!     members: ["zoe", "amir", "li"].iter().map(|s| s.to_string()).collect(),
//! };
//! let text = dump(&[Item::value(&team).unwrap()], DumpMode::Raw);
//! assert!(text.find("\"amir\"").unwrap() < text.find("\"zoe\"").unwrap());
//! ```

use crate::node::sort_canonical;
use crate::{to_node, Node};
use serde::ser::{Error, Serialize, Serializer};

/// `serialize_with` function writing a collection in canonical element order.
///
/// Works with any serializer, not just the one behind [`dump`](crate::dump).
pub fn unordered<'c, C, S>(collection: &'c C, serializer: S) -> Result<S::Ok, S::Error>
where
    C: ?Sized,
    &'c C: IntoIterator,
    <&'c C as IntoIterator>::Item: Serialize,
    S: Serializer,
{
    let mut keyed = Vec::new();
    for element in collection {
        let node: Node = to_node(&element).map_err(S::Error::custom)?;
        keyed.push((node, element));
    }
    sort_canonical(&mut keyed, |(node, _)| node);
    serializer.collect_seq(keyed.into_iter().map(|(_, element)| element))
}

/// Borrowing wrapper that serializes a collection in canonical order.
///
/// ```
/// use keepsake_dump::{dump, DumpMode, Item, Unordered};
/// use std::collections::HashSet;
///
/// let tags: HashSet<&str> = ["b", "c", "a"].into_iter().collect();
/// let item = Item::value(&Unordered(&tags)).unwrap();
/// assert!(dump(&[item], DumpMode::Raw).starts_with("(seq) (len=3) [\n  (str) (len=1) \"a\","));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Unordered<'a, C: ?Sized>(pub &'a C);

impl<C> Serialize for Unordered<'_, C>
where
    C: ?Sized,
    for<'a> &'a C: IntoIterator,
    for<'a> <&'a C as IntoIterator>::Item: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        unordered(self.0, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dump, DumpMode, Item};
    use serde::Serialize;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_equal_hash_sets_dump_identically() {
        let dumps: HashSet<String> = (0..20)
            .map(|_| {
                let set: HashSet<i32> = (0..16).collect();
                dump(&[Item::value(&Unordered(&set)).unwrap()], DumpMode::Raw)
            })
            .collect();
        assert_eq!(dumps.len(), 1);
    }

    #[test]
    fn test_matches_ordered_set() {
        let hashed: HashSet<i32> = [10, -3, 2].into_iter().collect();
        let ordered: BTreeSet<i32> = hashed.iter().copied().collect();

        assert_eq!(
            dump(&[Item::value(&Unordered(&hashed)).unwrap()], DumpMode::Raw),
            dump(&[Item::value(&ordered).unwrap()], DumpMode::Raw)
        );
    }

    #[derive(Serialize)]
    struct Tagged {
        #[serde(serialize_with = "unordered")]
        tags: HashSet<(u8, char)>,
    }

    #[test]
    fn test_serialize_with_on_a_field() {
        let tagged = Tagged {
            tags: [(2, 'b'), (1, 'z'), (1, 'a')].into_iter().collect(),
        };
        let text = dump(&[Item::value(&tagged).unwrap()], DumpMode::Raw);

        let pos = |needle: &str| text.find(needle).unwrap();
        assert!(pos("'a'") < pos("'z'"));
        assert!(pos("'z'") < pos("'b'"));
    }

    #[test]
    fn test_other_serializers_see_sorted_elements() {
        let set: HashSet<&str> = ["pear", "apple", "fig"].into_iter().collect();
        let json = serde_json::to_string(&Unordered(&set)).unwrap();
        assert_eq!(json, r#"["apple","fig","pear"]"#);
    }
}
