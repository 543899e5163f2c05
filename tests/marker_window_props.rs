use placemark::{LatLng, Marker, MarkerId, MarkerStyle, MarkerWindow, Place};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert,
    /// Evict the marker at this index (modulo length), or a missing id when empty
    Evict(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Insert),
        1 => any::<usize>().prop_map(Op::Evict),
    ]
}

fn place(n: usize) -> Place {
    Place::new(format!("place-{n}"), LatLng::new(0.0, 0.0)).unwrap()
}

proptest! {
    #[test]
    fn window_invariants_hold_after_every_mutation(
        capacity in 1usize..8,
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut window = MarkerWindow::new(capacity);
        let mut inserted = 0usize;
        let mut last_inserted = None;

        for op in ops {
            match op {
                Op::Insert => {
                    last_inserted = Some(window.insert(place(inserted)));
                    inserted += 1;
                    // The newest place is always the current one
                    prop_assert_eq!(window.current().map(Marker::id), last_inserted);
                }
                Op::Evict(index) => {
                    let target = if window.is_empty() {
                        MarkerId(u64::MAX)
                    } else {
                        window.iter().nth(index % window.len()).map(Marker::id).unwrap()
                    };
                    let before = window.len();
                    let evicted = window.evict(target);
                    prop_assert_eq!(window.len(), before - usize::from(evicted.is_some()));
                }
            }

            prop_assert!(window.len() <= capacity);
            prop_assert!(window.check_invariants());
            let current = window.iter().filter(|m| m.style() == MarkerStyle::Current).count();
            prop_assert_eq!(current, usize::from(!window.is_empty()));
        }
    }

    #[test]
    fn inserts_evict_in_fifo_order(capacity in 1usize..8, extra in 0usize..8) {
        let mut window = MarkerWindow::new(capacity);
        let total = capacity + extra;
        for n in 0..total {
            window.insert(place(n));
        }

        let names: Vec<String> = window.places().map(|p| p.name().to_string()).collect();
        let expected: Vec<String> = (extra..total).map(|n| format!("place-{n}")).collect();
        prop_assert_eq!(names, expected);
        prop_assert_eq!(window.current().map(|m| m.label().to_string()), Some(format!("place-{}", total - 1)));
    }
}
