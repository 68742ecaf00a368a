use dicemark_lib::dice::Keep;
use dicemark_lib::parse;
use dicemark_lib::roll::history::History;
use dicemark_lib::scanner;
use dicemark_lib::solver::Solver;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn notation() -> impl Strategy<Value = String> {
    (
        prop::option::of(0u64..=40),
        1u64..=100,
        prop::option::of((any::<bool>(), 1u64..=8)),
        prop::option::of(-50i64..=50),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(count, sides, keep, modifier, upper, spaced)| {
            let gap = if spaced { " " } else { "" };
            let mut notation = String::new();
            if let Some(count) = count {
                notation.push_str(&count.to_string());
            }
            notation.push_str(gap);
            notation.push(if upper { 'D' } else { 'd' });
            notation.push_str(&sides.to_string());
            if let Some((high, n)) = keep {
                notation.push_str(gap);
                notation.push_str(if high { "kh" } else { "KL" });
                notation.push_str(&n.to_string());
            }
            if let Some(modifier) = modifier {
                let sign = if modifier < 0 { '-' } else { '+' };
                notation.push_str(&format!("{gap}{sign}{gap}{}", modifier.unsigned_abs()));
            }
            notation
        })
}

proptest! {
    #[test]
    fn canonical_form_is_a_fixed_point(input in notation()) {
        let first = parse(&input).unwrap();
        let second = parse(first.canonical()).unwrap();
        prop_assert_eq!(first.canonical(), second.canonical());
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn whitespace_anywhere_is_ignored(input in notation(), gaps in prop::collection::vec(any::<bool>(), 32)) {
        let spread: String = input
            .chars()
            .zip(gaps.iter().cycle())
            .flat_map(|(c, &gap)| if gap { vec![c, ' '] } else { vec![c] })
            .collect();
        prop_assert_eq!(parse(&input).unwrap(), parse(&spread).unwrap());
    }

    #[test]
    fn flat_modifiers_parse(value in -100_000i64..=100_000) {
        let d = parse(&format!("{value:+}")).unwrap();
        prop_assert!(d.is_flat());
        prop_assert_eq!(value, d.get_modifier());
        prop_assert_eq!(0, d.get_count());
    }

    #[test]
    fn outcomes_within_sides(input in notation(), seed in any::<u64>()) {
        let solver = Solver::new(&input).unwrap();
        let descriptor = solver.descriptor().clone();
        let res = solver.solve_with(&mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(descriptor.get_count() as usize, res.get_outcomes().len());
        for outcome in res.get_outcomes() {
            prop_assert!((1..=descriptor.get_sides()).contains(&outcome.value));
        }
        prop_assert_eq!(descriptor.kept_count() as usize, res.kept().count());
        prop_assert!(res.get_total() >= descriptor.min());
        prop_assert!(res.get_total() <= descriptor.max());
        prop_assert_eq!(res.get_kept_total() + descriptor.get_modifier(), res.get_total());
    }

    #[test]
    fn kept_dice_dominate_dropped(count in 1u64..=12, n in 1u64..=12, high in any::<bool>(), seed in any::<u64>()) {
        let keep = if high { Keep::High(n) } else { Keep::Low(n) };
        let res = Solver::new(&format!("{count}d6{keep}"))
            .unwrap()
            .solve_with(&mut StdRng::seed_from_u64(seed))
            .unwrap();
        for kept in res.kept() {
            for dropped in res.dropped() {
                if high {
                    prop_assert!(kept >= dropped);
                } else {
                    prop_assert!(kept <= dropped);
                }
            }
        }
    }

    #[test]
    fn history_never_exceeds_capacity(capacity in 0usize..=8, rolls in 0usize..=20) {
        let mut history = History::with_capacity(capacity);
        for value in 0..rolls {
            history.record(Solver::new(&value.to_string()).unwrap().solve().unwrap());
        }
        prop_assert_eq!(rolls.min(capacity), history.len());
        if capacity > 0 && rolls > 0 {
            prop_assert_eq!((rolls - 1) as i64, history.latest().unwrap().get_total());
        }
    }

    #[test]
    fn token_spans_match_text(text in ".{0,80}") {
        let tokens = scanner::scan(&text);
        let mut cursor = 0;
        for token in &tokens {
            prop_assert!(token.span.start >= cursor);
            prop_assert_eq!(&text[token.span.clone()], token.matched.as_str());
            prop_assert!(parse(&token.notation).is_ok());
            cursor = token.span.end;
        }
        if tokens.is_empty() && !text.contains('[') {
            prop_assert_eq!(&text, &scanner::annotate(&text));
        }
    }
}
