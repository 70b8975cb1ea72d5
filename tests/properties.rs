use gobuild_constraints::{line_satisfied, tag_satisfied, BuildContext};
use proptest::prelude::*;

fn context_strategy() -> impl Strategy<Value = BuildContext> {
    (
        "[a-z][a-z0-9]{0,7}",
        "[a-z0-9]{1,8}",
        prop::collection::vec("[a-z_][a-z0-9_.]{0,6}", 0..4),
        1u32..40,
    )
        .prop_map(|(goos, goarch, tags, minor)| {
            BuildContext::release(goos, goarch, minor).with_tags(tags)
        })
}

proptest! {
    #[test]
    fn negation_inverts(ctx in context_strategy(), tag in "[a-z0-9_.]{0,8}") {
        prop_assert_eq!(tag_satisfied(&ctx, &format!("!{tag}")), !tag_satisfied(&ctx, &tag));
    }

    #[test]
    fn os_and_arch_always_match(ctx in context_strategy()) {
        prop_assert!(tag_satisfied(&ctx, ctx.goos()));
        prop_assert!(tag_satisfied(&ctx, ctx.goarch()));
    }

    #[test]
    fn version_predicate_is_monotonic(goos in "[a-z]{3,6}", minor in 1u32..40, n in 0u32..80) {
        let ctx = BuildContext::release(goos, "amd64", minor);
        prop_assert_eq!(tag_satisfied(&ctx, &format!("go1.{n}")), n <= minor);
    }

    #[test]
    fn non_constraint_lines_hold(ctx in context_strategy(), line in "[^+].{0,30}") {
        prop_assert!(line_satisfied(&ctx, &line));
    }
}
