//! Typed, compact storage of the nine remap relations, parsed from their
//! string form on the command line.
//!
//! Three textual schemas cover all nine relations: `a:b` (one source code to
//! one destination code), `a,b:c` (a signed pair of source codes to one
//! destination code), and `a:b,c` (one source code to a signed pair of
//! destination codes). Malformed entries are dropped, not rejected — shell
//! quoting mistakes shouldn't abort the whole command line.

use log::warn;

macro_rules! pair_rule {
    ($name:ident, $from:ident, $to:ident) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub $from: u16,
            pub $to: u16,
        }
    };
}

macro_rules! split_rule {
    ($name:ident, $one:ident, $neg:ident, $pos:ident) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub struct $name {
            pub $one: u16,
            pub $neg: u16,
            pub $pos: u16,
        }
    };
}

pair_rule!(KkRule, src, dst);
split_rule!(KrRule, neg_key, pos_key, axis);
split_rule!(KaRule, neg_key, pos_key, axis);
split_rule!(RkRule, axis, neg_key, pos_key);
pair_rule!(RrRule, src, dst);
pair_rule!(RaRule, src, dst);
split_rule!(AkRule, axis, neg_key, pos_key);
pair_rule!(ArRule, src, dst);
pair_rule!(AaRule, src, dst);

/// A rule table for one of the nine relations: an ordered list, first match
/// wins on lookup by source code.
#[derive(Clone, Debug)]
pub struct Table<R> {
    rules: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Table { rules: Vec::new() }
    }
}

impl<R> Table<R> {
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rules.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_pair(s: &str) -> Option<(u16, u16)> {
    let (a, b) = s.split_once(':')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_two_to_one(s: &str) -> Option<(u16, u16, u16)> {
    let (lhs, rhs) = s.split_once(':')?;
    let (a, b) = lhs.split_once(',')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?, rhs.trim().parse().ok()?))
}

fn parse_one_to_two(s: &str) -> Option<(u16, u16, u16)> {
    let (lhs, rhs) = s.split_once(':')?;
    let (a, b) = rhs.split_once(',')?;
    Some((lhs.trim().parse().ok()?, a.trim().parse().ok()?, b.trim().parse().ok()?))
}

macro_rules! impl_pair_table {
    ($build:ident, $rule:ty, $from:ident, $to:ident, $flag:literal) => {
        pub fn $build(strings: &[String]) -> Table<$rule> {
            let mut rules = Vec::with_capacity(strings.len());
            for s in strings {
                match parse_pair(s) {
                    Some(($from, $to)) => rules.push(<$rule>::new($from, $to)),
                    None => warn!(concat!($flag, ": skipping malformed rule {:?}"), s),
                }
            }
            Table { rules }
        }
    };
}

impl KkRule {
    fn new(src: u16, dst: u16) -> Self {
        KkRule { src, dst }
    }
}
impl RrRule {
    fn new(src: u16, dst: u16) -> Self {
        RrRule { src, dst }
    }
}
impl RaRule {
    fn new(src: u16, dst: u16) -> Self {
        RaRule { src, dst }
    }
}
impl ArRule {
    fn new(src: u16, dst: u16) -> Self {
        ArRule { src, dst }
    }
}
impl AaRule {
    fn new(src: u16, dst: u16) -> Self {
        AaRule { src, dst }
    }
}

impl_pair_table!(parse_kk, KkRule, src, dst, "--key-key");
impl_pair_table!(parse_rr, RrRule, src, dst, "--rel-rel");
impl_pair_table!(parse_ra, RaRule, src, dst, "--rel-abs");
impl_pair_table!(parse_ar, ArRule, src, dst, "--abs-rel");
impl_pair_table!(parse_aa, AaRule, src, dst, "--abs-abs");

macro_rules! impl_split_rule_2to1 {
    ($build:ident, $rule:ty, $flag:literal) => {
        pub fn $build(strings: &[String]) -> Table<$rule> {
            let mut rules = Vec::with_capacity(strings.len());
            for s in strings {
                match parse_two_to_one(s) {
                    Some((neg_key, pos_key, axis)) => {
                        rules.push(<$rule>::new(neg_key, pos_key, axis))
                    }
                    None => warn!(concat!($flag, ": skipping malformed rule {:?}"), s),
                }
            }
            Table { rules }
        }
    };
}

macro_rules! impl_split_rule_1to2 {
    ($build:ident, $rule:ty, $flag:literal) => {
        pub fn $build(strings: &[String]) -> Table<$rule> {
            let mut rules = Vec::with_capacity(strings.len());
            for s in strings {
                match parse_one_to_two(s) {
                    Some((axis, neg_key, pos_key)) => {
                        rules.push(<$rule>::new(axis, neg_key, pos_key))
                    }
                    None => warn!(concat!($flag, ": skipping malformed rule {:?}"), s),
                }
            }
            Table { rules }
        }
    };
}

impl KrRule {
    fn new(neg_key: u16, pos_key: u16, axis: u16) -> Self {
        KrRule { neg_key, pos_key, axis }
    }
}
impl KaRule {
    fn new(neg_key: u16, pos_key: u16, axis: u16) -> Self {
        KaRule { neg_key, pos_key, axis }
    }
}
impl RkRule {
    fn new(axis: u16, neg_key: u16, pos_key: u16) -> Self {
        RkRule { axis, neg_key, pos_key }
    }
}
impl AkRule {
    fn new(axis: u16, neg_key: u16, pos_key: u16) -> Self {
        AkRule { axis, neg_key, pos_key }
    }
}

impl_split_rule_2to1!(parse_kr, KrRule, "--key-rel");
impl_split_rule_2to1!(parse_ka, KaRule, "--key-abs");
impl_split_rule_1to2!(parse_rk, RkRule, "--rel-key");
impl_split_rule_1to2!(parse_ak, AkRule, "--abs-key");

/// All nine rule tables, assembled once at startup.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    pub kk: Table<KkRule>,
    pub kr: Table<KrRule>,
    pub ka: Table<KaRule>,
    pub rk: Table<RkRule>,
    pub rr: Table<RrRule>,
    pub ra: Table<RaRule>,
    pub ak: Table<AkRule>,
    pub ar: Table<ArRule>,
    pub aa: Table<AaRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kk() {
        let t = parse_kk(&["30:48".to_string()]);
        assert_eq!(t.iter().collect::<Vec<_>>(), vec![&KkRule { src: 30, dst: 48 }]);
    }

    #[test]
    fn drops_malformed_kk() {
        let t = parse_kk(&["not-a-rule".to_string(), "30:48".to_string()]);
        assert_eq!(t.iter().count(), 1);
    }

    #[test]
    fn parses_kr_two_to_one() {
        let t = parse_kr(&["105,106:0".to_string()]);
        assert_eq!(
            t.iter().collect::<Vec<_>>(),
            vec![&KrRule { neg_key: 105, pos_key: 106, axis: 0 }]
        );
    }

    #[test]
    fn parses_rk_one_to_two() {
        let t = parse_rk(&["0:105,106".to_string()]);
        assert_eq!(
            t.iter().collect::<Vec<_>>(),
            vec![&RkRule { axis: 0, neg_key: 105, pos_key: 106 }]
        );
    }

    #[test]
    fn first_match_wins_preserves_insertion_order() {
        let t = parse_kk(&["30:48".to_string(), "30:49".to_string()]);
        assert_eq!(t.iter().next().unwrap().dst, 48);
    }
}
