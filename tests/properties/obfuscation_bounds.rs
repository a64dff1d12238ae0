//! Property tests for obfuscation parameter validation and flag rendering.

use proptest::prelude::*;

use denim::domain::value_objects::{
    clamp_integer_arg, BogusControlFlow, ControlFlowFlattening, InstructionSubstitution,
    ObfuscationParameters, MAX_BCF_LOOP, MAX_PROBABILITY, MAX_SPLIT, MAX_SUB_LOOP,
};

fn params(
    bcf: (bool, i64, i64),
    sub: (bool, i64),
    flatten: (bool, i64),
) -> ObfuscationParameters {
    ObfuscationParameters::new(
        BogusControlFlow {
            enabled: bcf.0,
            loop_count: bcf.1,
            probability_percent: bcf.2,
        },
        InstructionSubstitution {
            enabled: sub.0,
            loop_count: sub.1,
        },
        ControlFlowFlattening {
            enabled: flatten.0,
            split_count: flatten.1,
        },
        "property",
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation passes exactly when every enabled value is within its bound.
    #[test]
    fn property_validate_matches_bounds(
        bcf in (any::<bool>(), -10i64..20, -10i64..200),
        sub in (any::<bool>(), -10i64..20),
        flatten in (any::<bool>(), -10i64..20),
    ) {
        let within = (!bcf.0 || (bcf.1 <= MAX_BCF_LOOP && bcf.2 <= MAX_PROBABILITY))
            && (!sub.0 || sub.1 <= MAX_SUB_LOOP)
            && (!flatten.0 || flatten.1 <= MAX_SPLIT);

        prop_assert_eq!(params(bcf, sub, flatten).validate().is_ok(), within);
    }

    /// PROPERTY: rendered flag values are never negative.
    #[test]
    fn property_flag_values_are_clamped(
        loop_count in -100i64..=MAX_BCF_LOOP,
        probability in -100i64..=MAX_PROBABILITY,
        sub_loop in -100i64..=MAX_SUB_LOOP,
    ) {
        let p = params((true, loop_count, probability), (true, sub_loop), (false, 0));
        let flags = p.build_flags().unwrap();

        prop_assert_eq!(flags[1].as_str(), format!("-bcf_prob={}", clamp_integer_arg(probability)));
        prop_assert_eq!(flags[2].as_str(), format!("-bcf_loop={}", clamp_integer_arg(loop_count)));
        prop_assert_eq!(flags[4].as_str(), format!("-sub_loop={}", clamp_integer_arg(sub_loop)));
        prop_assert!(flags.iter().all(|f| !f.as_str().contains("=-")));
    }

    /// PROPERTY: the key flag is always last and appears once.
    #[test]
    fn property_seed_flag_is_last(
        bcf in any::<bool>(),
        sub in any::<bool>(),
        flatten in any::<bool>(),
    ) {
        let p = params((bcf, 1, 50), (sub, 1), (flatten, 1));
        let flags = p.build_flags().unwrap();

        let seeds = flags.iter().filter(|f| f.as_str().starts_with("-aesSeed=")).count();
        prop_assert_eq!(seeds, 1);
        prop_assert!(flags.last().unwrap().as_str().starts_with("-aesSeed="));
        prop_assert_eq!(flags.len(), 1 + if bcf { 3 } else { 0 } + if sub { 2 } else { 0 });
    }
}
