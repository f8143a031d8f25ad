//! Execution model: decode one configuration's event text into ordered points.

use crate::error::VizError;
use crate::log::ConfigurationKey;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static POINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*<->\s*(\d+)$").expect("point pattern is valid"));

/// One executed iteration and the thread that ran it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionPoint {
    pub iteration: u64,
    pub thread: u32,
}

impl ExecutionPoint {
    pub fn new(iteration: u64, thread: u32) -> Self {
        Self { iteration, thread }
    }
}

/// Points of one configuration, in execution (log) order.
///
/// Iterations and threads are kept as parallel sequences; index `i` of both is
/// the `i`-th logged event.
#[derive(Debug, Clone)]
pub struct Distribution {
    key: ConfigurationKey,
    iterations: Vec<u64>,
    threads: Vec<u32>,
}

impl Distribution {
    /// Decode accumulated event text.
    ///
    /// Tokens are separated by commas or newlines; blank tokens (trailing
    /// separators, empty segments) are skipped. Every other token must look
    /// like `12<->3`.
    pub fn from_events(key: ConfigurationKey, text: &str) -> Result<Self, VizError> {
        let mut iterations = Vec::new();
        let mut threads = Vec::new();

        let tokens = text
            .split(['\n', ','])
            .map(str::trim)
            .filter(|t| !t.is_empty());

        for (position, token) in tokens.enumerate() {
            let point = parse_point(token).ok_or_else(|| VizError::Parse {
                key: key.to_string(),
                position,
                token: token.to_string(),
            })?;
            iterations.push(point.iteration);
            threads.push(point.thread);
        }

        Ok(Self {
            key,
            iterations,
            threads,
        })
    }

    pub fn key(&self) -> &ConfigurationKey {
        &self.key
    }

    pub fn iterations(&self) -> &[u64] {
        &self.iterations
    }

    pub fn threads(&self) -> &[u32] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.iterations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iterations.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = ExecutionPoint> + '_ {
        self.iterations()
            .iter()
            .zip(self.threads())
            .map(|(&iteration, &thread)| ExecutionPoint::new(iteration, thread))
    }

    /// Distinct thread ids, ascending.
    pub fn distinct_threads(&self) -> Vec<u32> {
        self.threads
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn max_iteration(&self) -> Option<u64> {
        self.iterations.iter().copied().max()
    }

    pub fn max_thread(&self) -> Option<u32> {
        self.threads.iter().copied().max()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Distribution> {} :", self.key)?;
        for (i, p) in self.points().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}<->{}", sep, p.iteration, p.thread)?;
        }
        Ok(())
    }
}

fn parse_point(token: &str) -> Option<ExecutionPoint> {
    let caps = POINT_RE.captures(token)?;
    let iteration = caps[1].parse().ok()?;
    let thread = caps[2].parse().ok()?;
    Some(ExecutionPoint::new(iteration, thread))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::parse::group_segments;
    use pretty_assertions::assert_eq;

    fn points(d: &Distribution) -> Vec<(u64, u32)> {
        d.points().map(|p| (p.iteration, p.thread)).collect()
    }

    fn build(log: &str) -> Vec<(ConfigurationKey, Vec<(u64, u32)>)> {
        group_segments(log)
            .unwrap()
            .into_iter()
            .map(|(k, text)| {
                let d = Distribution::from_events(k.clone(), &text).unwrap();
                (k, points(&d))
            })
            .collect()
    }

    #[test]
    fn comma_separated_points() {
        assert_eq!(
            build("foo schedule:::1<->0, 2<->1, 3<->0"),
            vec![(
                ConfigurationKey::new("foo", None),
                vec![(1, 0), (2, 1), (3, 0)]
            )]
        );
    }

    #[test]
    fn two_keys() {
        assert_eq!(
            build("foo schedule chunk=4::: 1<->0:::bar schedule:::5<->2"),
            vec![
                (ConfigurationKey::new("foo", Some(4)), vec![(1, 0)]),
                (ConfigurationKey::new("bar", None), vec![(5, 2)]),
            ]
        );
    }

    #[test]
    fn newline_separated_points_with_trailing_blank_lines() {
        let d = Distribution::from_events(
            ConfigurationKey::new("Static", Some(1)),
            "0<->0\n1<->1\n2<->0\n\n",
        )
        .unwrap();
        assert_eq!(points(&d), vec![(0, 0), (1, 1), (2, 0)]);
        assert_eq!(d.iterations(), &[0, 1, 2]);
        assert_eq!(d.threads(), &[0, 1, 0]);
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let d = Distribution::from_events(
            ConfigurationKey::new("x", None),
            "7<->1, 3<->0, 7<->1, 0<->2,",
        )
        .unwrap();
        assert_eq!(points(&d), vec![(7, 1), (3, 0), (7, 1), (0, 2)]);
        assert_eq!(d.distinct_threads(), vec![0, 1, 2]);
        assert_eq!(d.max_iteration(), Some(7));
        assert_eq!(d.max_thread(), Some(2));
    }

    #[test]
    fn bad_token_is_a_parse_error() {
        let err = Distribution::from_events(ConfigurationKey::new("x", None), "1<->0, 2<-1")
            .unwrap_err();
        match err {
            VizError::Parse { position, token, .. } => {
                assert_eq!(position, 1);
                assert_eq!(token, "2<-1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn negative_numbers_are_rejected() {
        assert!(Distribution::from_events(ConfigurationKey::new("x", None), "-1<->0").is_err());
    }

    #[test]
    fn empty_segment_leaves_points_unchanged() {
        let with_empty = build("a schedule:::1<->0, 2<->1:::a schedule:::");
        let without = build("a schedule:::1<->0, 2<->1");
        assert_eq!(with_empty, without);
    }

    #[test]
    fn grouping_is_associative() {
        let first = "1<->0, 2<->1";
        let second = "3<->0\n4<->2";
        let joined = build(&format!("s schedule:::{first}:::s schedule:::{second}"));

        let key = ConfigurationKey::new("s", None);
        let mut separate = points(&Distribution::from_events(key.clone(), first).unwrap());
        separate.extend(points(&Distribution::from_events(key.clone(), second).unwrap()));

        assert_eq!(joined, vec![(key, separate)]);
    }

    #[test]
    fn synthetic_log_round_trip() {
        let expected: Vec<(ConfigurationKey, Vec<(u64, u32)>)> = vec![
            (
                ConfigurationKey::new("Default", None),
                vec![(0, 0), (2, 1), (1, 0), (3, 1)],
            ),
            (
                ConfigurationKey::new("Static", Some(1)),
                vec![(0, 0), (1, 1), (2, 2), (3, 3)],
            ),
            (
                ConfigurationKey::new("Dynamic", Some(4)),
                vec![(4, 1), (0, 0), (5, 1), (1, 0), (1, 0)],
            ),
        ];

        let mut log = String::new();
        for (key, pts) in &expected {
            match key.chunk {
                Some(c) => log.push_str(&format!("{} schedule, chunk={}:\n:::", key.name, c)),
                None => log.push_str(&format!("{} schedule:\n:::", key.name)),
            }
            for (i, t) in pts {
                log.push_str(&format!("{}<->{}\n", i, t));
            }
            log.push_str("\n:::");
        }

        assert_eq!(build(&log), expected);
    }

    #[test]
    fn point_count_matches_token_count() {
        let text = "1<->0, 2<->1\n3<->0,\n\n4<->3";
        let d = Distribution::from_events(ConfigurationKey::new("x", None), text).unwrap();
        assert_eq!(d.len(), text.matches("<->").count());
    }

    #[test]
    fn display_lists_points() {
        let d = Distribution::from_events(ConfigurationKey::new("foo", Some(4)), "1<->0, 2<->1")
            .unwrap();
        assert_eq!(
            d.to_string(),
            "<Distribution> foo, chunk=4 : 1<->0, 2<->1"
        );
    }
}
