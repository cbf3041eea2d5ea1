use htgate::{parse, AccessEntry, Decision, OrderMode, RequestContext};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Invariant 1: token classification priority
//
// Each classification arm must shadow the later ones, for any token shape.
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn dotted_digit_tokens_classify_as_ip(octets in proptest::collection::vec(0u8..=255, 1..=4)) {
        let token = octets
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let entries = parse::entries("allow", &format!("from {token}")).unwrap();
        prop_assert_eq!(entries.len(), 1);
        prop_assert!(matches!(entries[0], AccessEntry::IpMatch(_)));
    }

    #[test]
    fn env_negation_shadows_env_presence(name in "[A-Z_][A-Z0-9_]{0,15}") {
        let entries = parse::entries("allow", &format!("from env=!{name} env={name}")).unwrap();
        prop_assert_eq!(entries.len(), 2);
        prop_assert_eq!(&entries[0], &AccessEntry::EnvAbsent(name.clone()));
        prop_assert_eq!(&entries[1], &AccessEntry::EnvPresent(name));
    }

    #[test]
    fn alphabetic_tokens_classify_as_host(host in "[a-z]{1,10}(\\.[a-z]{2,5}){1,2}") {
        let entries = parse::entries("deny", &format!("from {host}")).unwrap();
        prop_assert_eq!(entries, vec![AccessEntry::HostMatch(host)]);
    }

    #[test]
    fn token_count_is_preserved(count in 1usize..8) {
        let line = format!("from {}", vec!["all"; count].join(" "));
        let entries = parse::entries("allow", &line).unwrap();
        prop_assert_eq!(entries.len(), count);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: decisions are deterministic per policy + context
// ---------------------------------------------------------------------------

fn arb_order() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("allow,deny"),
        Just("deny,allow"),
        Just("mutual-failure"),
    ]
}

proptest! {
    #[test]
    fn check_access_is_deterministic(
        order in arb_order(),
        allow_all in any::<bool>(),
        deny_all in any::<bool>(),
    ) {
        let mut builder = htgate::AccessPolicy::builder().order(order).unwrap();
        if allow_all {
            builder = builder.allow("from all").unwrap();
        }
        if deny_all {
            builder = builder.deny("from all").unwrap();
        }
        let policy = builder.build();

        let first = policy.check_access(&mut RequestContext::new("10.0.0.1".parse().unwrap()));
        for _ in 0..3 {
            let mut ctx = RequestContext::new("10.0.0.1".parse().unwrap());
            prop_assert_eq!(policy.check_access(&mut ctx), first);
        }
    }

    #[test]
    fn deny_then_allow_always_permits_when_allow_matches(deny_all in any::<bool>()) {
        let mut builder = htgate::AccessPolicy::builder()
            .order("deny,allow")
            .unwrap()
            .allow("from all")
            .unwrap();
        if deny_all {
            builder = builder.deny("from all").unwrap();
        }
        let policy = builder.build();
        prop_assert_eq!(policy.order(), OrderMode::DenyThenAllow);

        let mut ctx = RequestContext::new("8.8.8.8".parse().unwrap());
        prop_assert_eq!(policy.check_access(&mut ctx), Decision::Permit);
    }
}
