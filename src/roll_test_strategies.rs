use proptest::prelude::*;

pub(crate) fn condition_strategy() -> impl Strategy<Value = String> {
    (prop::sample::select(vec!["", "<", "<=", ">", ">=", "="]), 1..=20i64)
        .prop_map(|(op, n)| format!("{}{}", op, n))
}

pub(crate) fn modifier_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (prop::sample::select(vec!["kh", "kl", "dh", "dl", "k"]), 1..=5u8)
            .prop_map(|(op, n)| format!("{}{}", op, n)),
        (prop::sample::select(vec!["r", "ro", "!", "!!"]), condition_strategy())
            .prop_map(|(op, cond)| format!("{}{}", op, cond)),
        (prop::sample::select(vec![">", ">=", "<", "="]), 1..=20u8)
            .prop_map(|(op, n)| format!("{}{}", op, n)),
    ]
}

pub(crate) fn dice_strategy() -> impl Strategy<Value = String> {
    (1..=10u8, prop::sample::select(vec![2, 4, 6, 8, 10, 12, 20, 100]))
        .prop_flat_map(|(count, sides)| {
            prop::collection::vec(modifier_strategy(), 0..3)
                .prop_map(move |mods| format!("{}d{}{}", count, sides, mods.concat()))
        })
}

/// Well-formed notation: integers and dice combined with arithmetic and
/// parentheses.
pub(crate) fn notation_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![(0..1000i64).prop_map(|n| n.to_string()), dice_strategy()];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/"]), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|x| format!("({})", x)),
            inner.prop_map(|x| format!("-{}", x)),
        ]
    })
}
