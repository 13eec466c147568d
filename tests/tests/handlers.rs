//! Constraint handler, numberer and system integration tests.

use femcat_tests::prelude::*;

mod penalty_defaults {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("penalty_defaults")
            .step(
                "create_with_defaults",
                |s| s.create_handler("Penalty", params! {}),
                |a| {
                    a.created(1)
                        .param(ComponentKind::ConstraintHandler, 1, "alpha_s", 1.0e6)
                        .param(ComponentKind::ConstraintHandler, 1, "alpha_m", 1.0e6)
                },
            )
            .step(
                "create_with_override",
                |s| s.create_handler("Penalty", params! { "alpha_s" => 1.0e7 }),
                |a| {
                    a.created(2)
                        .param(ComponentKind::ConstraintHandler, 2, "alpha_s", 1.0e7)
                        .param(ComponentKind::ConstraintHandler, 2, "alpha_m", 1.0e6)
                        .count(ComponentKind::ConstraintHandler, 2)
                },
            )
    }

    #[test]
    fn test_defaults_and_overrides_round_trip() {
        scenario().run().unwrap();
    }
}

mod rejected_inputs {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("rejected_inputs")
            .step(
                "unknown_variant",
                |s| s.create_handler("Penalti", params! {}),
                |a| {
                    a.error_matches(r"^Unknown constraint handler variant: Penalti")
                        .error("did you mean `Penalty`?")
                },
            )
            .step(
                "int_where_float_expected",
                |s| s.create_handler("Penalty", params! { "alpha_s" => 10i64 }),
                |a| a.fields(&["alpha_s"]).error("expected Float, got Int"),
            )
            .step(
                "non_positive_penalty",
                |s| s.create_handler("Lagrange", params! { "alpha_m" => 0.0 }),
                |a| a.fields(&["alpha_m"]).error("out of range"),
            )
            .step(
                "misspelled_parameter",
                |s| s.create_handler("Penalty", params! { "alpha_ss" => 1.0 }),
                |a| a.fields(&["alpha_ss"]).error("did you mean `alpha_s`?"),
            )
            .step(
                "both_penalties",
                |s| {
                    s.create_handler(
                        "Auto",
                        params! { "auto_penalty" => 1.0, "user_penalty" => 2.0 },
                    )
                },
                |a| a.fields(&["auto_penalty", "user_penalty"]),
            )
            // Failed creations consume no tag
            .step(
                "first_success",
                |s| s.create_handler("Plain", params! {}),
                |a| a.created(1).count(ComponentKind::ConstraintHandler, 1),
            )
    }

    #[test]
    fn test_rejections_leave_no_state() {
        scenario().run().unwrap();
    }
}

mod numberer_singleton {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("numberer_singleton")
            .step(
                "create_plain",
                |s| s.create_numberer("Plain", params! {}),
                |a| a.created(1).count(ComponentKind::Numberer, 1),
            )
            .step(
                "replace_with_rcm",
                |s| s.create_numberer("RCM", params! {}),
                |a| {
                    a.created(2)
                        .count(ComponentKind::Numberer, 1)
                        .variant(ComponentKind::Numberer, None, "RCM")
                },
            )
            .step(
                "old_tag_is_gone",
                |s| s.remove(ComponentKind::Numberer, Tag::new(1)),
                |a| a.error("numberer #1 not found"),
            )
    }

    pub fn reject_scenario() -> Scenario {
        Scenario::new("numberer_singleton_reject")
            .config(SessionConfig::new().with_singleton_policy(ConflictPolicy::Reject))
            .step(
                "create_plain",
                |s| s.create_numberer("Plain", params! {}),
                |a| a.created(1),
            )
            .step(
                "second_is_rejected",
                |s| s.create_numberer("AMD", params! {}),
                |a| {
                    a.error_matches(r"^Singleton conflict: numberer #1 already exists")
                        .count(ComponentKind::Numberer, 1)
                        .variant(ComponentKind::Numberer, None, "Plain")
                },
            )
            .step(
                "replace_after_removal",
                |s| {
                    s.remove(ComponentKind::Numberer, Tag::new(1))?;
                    s.create_numberer("AMD", params! {})
                },
                |a| a.created(2).variant(ComponentKind::Numberer, Some(2), "AMD"),
            )
    }

    #[test]
    fn test_replace_policy() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_reject_policy() {
        reject_scenario().run().unwrap();
    }
}

mod mumps_system {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("mumps_system")
            .step(
                "create_mumps",
                |s| s.systems().create("Mumps", params! { "icntl7" => 5i64 }),
                |a| {
                    a.created(1)
                        .param(ComponentKind::System, 1, "icntl7", 5i64)
                        .param(ComponentKind::System, 1, "icntl14", 20.0)
                },
            )
            .step(
                "ordering_outside_allowed_set",
                |s| s.set_param(ComponentKind::System, Tag::new(1), "icntl7", 9i64),
                |a| {
                    a.fields(&["icntl7"])
                        .error("is not one of")
                        .param(ComponentKind::System, 1, "icntl7", 5i64)
                },
            )
            .step(
                "unset_restores_default",
                |s| s.unset_param(ComponentKind::System, Tag::new(1), "icntl7"),
                |a| {
                    a.ok()
                        .param(ComponentKind::System, 1, "icntl7", 7i64)
                        .assert_fn(|s| {
                            s.get(ComponentKind::System, Some(Tag::new(1)))
                                .map(|i| i.version == 2)
                                .unwrap_or(false)
                        })
                },
            )
    }

    #[test]
    fn test_setters_revalidate() {
        scenario().run().unwrap();
    }
}
