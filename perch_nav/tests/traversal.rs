// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow traversal over lists of every size.

use perch_nav::{Direction, Filter, Key, ListNavigator, NavOutcome};
use proptest::prelude::*;

proptest! {
    #[test]
    fn a_full_cycle_visits_every_candidate_once(n in 1_usize..40, forward in any::<bool>()) {
        let candidates = vec![false; n];
        let key = if forward { Key::ArrowDown } else { Key::ArrowUp };
        let mut nav = ListNavigator::new();
        let mut seen = vec![0_u32; n];
        for _ in 0..n {
            match nav.handle_key(key, true, &candidates) {
                NavOutcome::Moved(i) => {
                    prop_assert!(i < n);
                    seen[i] += 1;
                }
                other => prop_assert!(false, "unexpected outcome {other:?}"),
            }
        }
        prop_assert!(seen.iter().all(|&c| c == 1));
        // One more step returns to where the cycle started.
        let first = if forward { 0 } else { n - 1 };
        prop_assert_eq!(nav.handle_key(key, true, &candidates), NavOutcome::Moved(first));
    }

    #[test]
    fn focus_stays_in_range(
        n in 0_usize..12,
        steps in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        let mut nav = ListNavigator::new();
        for forward in steps {
            let dir = if forward { Direction::Forward } else { Direction::Backward };
            let focus = nav.step(dir, n);
            match focus {
                Some(i) => prop_assert!(i < n),
                None => prop_assert_eq!(n, 0),
            }
        }
    }

    #[test]
    fn filtered_indices_are_sorted_matches(
        labels in prop::collection::vec("[a-cA-C]{0,5}", 0..20),
        term in "[a-c]{0,2}",
    ) {
        let mut filter = Filter::new();
        filter.set_term(&term);
        let visible = filter.apply(labels.iter().map(String::as_str));
        prop_assert!(visible.windows(2).all(|w| w[0] < w[1]));
        for (i, label) in labels.iter().enumerate() {
            let matched = label.to_lowercase().contains(&term);
            prop_assert_eq!(visible.contains(&i), matched);
        }
    }
}
