//! Region and damping integration tests.

use femcat_tests::prelude::*;

mod element_range_listing {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("element_range_listing").step(
            "create_range_region",
            |s| s.create_region("ElementRegion", params! { "element_range" => [1i64, 100] }),
            |a| {
                a.created(1)
                    .count(ComponentKind::Region, 2)
                    .param(ComponentKind::Region, 1, "element_range", [1i64, 100])
                    .no_param(ComponentKind::Region, 1, "elements")
                    .assert_fn(|s| {
                        s.list(ComponentKind::Region).any(|r| {
                            r.get_param("element_range")
                                == Some(&Value::List(vec![Value::Int(1), Value::Int(100)]))
                                && !r.has_param("elements")
                        })
                    })
            },
        )
    }

    #[test]
    fn test_list_includes_range_without_elements() {
        scenario().run().unwrap();
    }
}

mod axis_exclusivity {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("axis_exclusivity")
            .step(
                "both_forms_in_one_call",
                |s| {
                    s.create_region(
                        "ElementRegion",
                        params! { "elements" => [1i64, 2], "element_range" => [1i64, 100] },
                    )
                },
                |a| {
                    a.fields(&["elements", "element_range"])
                        .error("mutually exclusive")
                        .count(ComponentKind::Region, 1)
                },
            )
            .step(
                "create_with_elements",
                |s| s.create_region("ElementRegion", params! { "elements" => [1i64, 2] }),
                |a| a.created(1),
            )
            .step(
                "switch_to_range",
                |s| s.set_component(Tag::new(1), RegionAxis::ElementRange, [1i64, 100]),
                |a| {
                    a.ok()
                        .param(ComponentKind::Region, 1, "element_range", [1i64, 100])
                        .no_param(ComponentKind::Region, 1, "elements")
                },
            )
            .step(
                "switch_back_to_list",
                |s| s.set_component(Tag::new(1), RegionAxis::Element, [4i64, 5, 6]),
                |a| {
                    a.ok()
                        .param(ComponentKind::Region, 1, "elements", [4i64, 5, 6])
                        .no_param(ComponentKind::Region, 1, "element_range")
                },
            )
            .step(
                "reversed_range",
                |s| s.set_component(Tag::new(1), RegionAxis::ElementRange, [9i64, 3]),
                |a| {
                    a.fields(&["element_range"])
                        .error("malformed range: start 9 > end 3")
                        .param(ComponentKind::Region, 1, "elements", [4i64, 5, 6])
                },
            )
            .step(
                "three_item_range",
                |s| {
                    s.create_region("NodeRegion", params! { "node_range" => [1i64, 2, 3] })
                },
                |a| a.fields(&["node_range"]).error("got 3 items"),
            )
    }

    #[test]
    fn test_last_write_wins_within_an_axis() {
        scenario().run().unwrap();
    }
}

mod both_axes {
    use super::*;

    fn mesh_region() -> VariantDef {
        VariantDef::new(ComponentKind::Region, "MeshRegion")
            .param(ParamDef::int_list(builtins::region::ELEMENTS))
            .param(ParamDef::range(builtins::region::ELEMENT_RANGE))
            .param(ParamDef::int_list(builtins::region::NODES))
            .param(ParamDef::range(builtins::region::NODE_RANGE))
            .exclusive([builtins::region::ELEMENTS, builtins::region::ELEMENT_RANGE])
            .exclusive([builtins::region::NODES, builtins::region::NODE_RANGE])
    }

    pub fn scenario() -> Scenario {
        Scenario::new("both_axes")
            .step("register", |s| s.register_variant(mesh_region()), |a| a.ok())
            .step(
                "create_with_element_range",
                |s| s.create_region("MeshRegion", params! { "element_range" => [1i64, 100] }),
                |a| a.created(1),
            )
            .step(
                "add_node_list",
                |s| s.set_component(Tag::new(1), RegionAxis::Node, [3i64, 4]),
                |a| {
                    a.ok()
                        .param(ComponentKind::Region, 1, "nodes", [3i64, 4])
                        .param(ComponentKind::Region, 1, "element_range", [1i64, 100])
                },
            )
            .step(
                "switch_node_axis_to_range",
                |s| s.set_component(Tag::new(1), RegionAxis::NodeRange, [5i64, 9]),
                |a| {
                    a.ok()
                        .param(ComponentKind::Region, 1, "node_range", [5i64, 9])
                        .no_param(ComponentKind::Region, 1, "nodes")
                        .param(ComponentKind::Region, 1, "element_range", [1i64, 100])
                },
            )
            .step(
                "both_axes_in_one_call",
                |s| {
                    s.create_region(
                        "MeshRegion",
                        params! { "elements" => [1i64, 2], "nodes" => [7i64, 8] },
                    )
                },
                |a| {
                    a.created(2)
                        .param(ComponentKind::Region, 2, "elements", [1i64, 2])
                        .param(ComponentKind::Region, 2, "nodes", [7i64, 8])
                },
            )
            .step(
                "both_node_forms_in_one_call",
                |s| {
                    s.create_region(
                        "MeshRegion",
                        params! { "nodes" => [1i64], "node_range" => [1i64, 5] },
                    )
                },
                |a| a.fields(&["nodes", "node_range"]).count(ComponentKind::Region, 3),
            )
    }

    #[test]
    fn test_exclusivity_is_per_axis() {
        scenario().run().unwrap();
    }
}

mod global_region {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("global_region")
            .step(
                "exists_at_start",
                |s| s.region_state(Tag::FIXED),
                |a| {
                    a.state(RegionState::Configured)
                        .count(ComponentKind::Region, 1)
                        .variant(ComponentKind::Region, Some(0), builtins::GLOBAL_REGION)
                },
            )
            .step(
                "cannot_be_removed",
                |s| s.remove(ComponentKind::Region, Tag::FIXED),
                |a| {
                    a.error("Protected instance: cannot remove region #0 (fixed instance)")
                        .count(ComponentKind::Region, 1)
                },
            )
            .step(
                "cannot_be_created",
                |s| s.create_region(builtins::GLOBAL_REGION, params! {}),
                |a| a.error("Singleton conflict").count(ComponentKind::Region, 1),
            )
            .step(
                "has_no_axes",
                |s| s.set_component(Tag::FIXED, RegionAxis::Node, [1i64]),
                |a| a.fields(&["nodes"]).error("unknown parameter"),
            )
    }

    #[test]
    fn test_global_region_is_fixed() {
        scenario().run().unwrap();
    }
}

mod damping_references {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("damping_references")
            .step(
                "create_damping",
                |s| {
                    s.create_damping(
                        "FrequencyRayleigh",
                        params! { "damping_factor" => 0.05, "f1" => 1.0, "f2" => 10.0 },
                    )
                },
                |a| a.created(1),
            )
            .step(
                "create_region_using_it",
                |s| {
                    s.create_region(
                        "ElementRegion",
                        params! { "elements" => [1i64, 2, 3], "damping" => Tag::new(1) },
                    )
                },
                |a| a.created(1),
            )
            .step(
                "remove_while_referenced",
                |s| s.remove(ComponentKind::Damping, Tag::new(1)),
                |a| {
                    a.error("referenced by region #1")
                        .count(ComponentKind::Damping, 1)
                },
            )
            .step(
                "clear_reference",
                |s| s.assign_damping(Tag::new(1), None),
                |a| a.ok().no_param(ComponentKind::Region, 1, "damping"),
            )
            .step(
                "remove_after_clearing",
                |s| s.remove(ComponentKind::Damping, Tag::new(1)),
                |a| a.ok().count(ComponentKind::Damping, 0),
            )
            .step(
                "reference_to_removed_damping",
                |s| s.assign_damping(Tag::new(1), Some(Tag::new(1))),
                |a| a.error("damping #1 not found"),
            )
    }

    pub fn region_removal_scenario() -> Scenario {
        Scenario::new("damping_released_by_region_removal")
            .step(
                "create_damping",
                |s| s.create_damping("SecStif", params! { "beta" => 0.01 }),
                |a| a.created(1),
            )
            .step(
                "create_region_using_it",
                |s| {
                    s.create_region(
                        "NodeRegion",
                        params! { "node_range" => [10i64, 20], "damping" => Tag::new(1) },
                    )
                },
                |a| a.created(1),
            )
            .step(
                "remove_region",
                |s| s.remove(ComponentKind::Region, Tag::new(1)),
                |a| a.ok().count(ComponentKind::Region, 1),
            )
            .step(
                "remove_damping",
                |s| s.remove(ComponentKind::Damping, Tag::new(1)),
                |a| a.ok().count(ComponentKind::Damping, 0),
            )
    }

    #[test]
    fn test_referenced_damping_is_protected() {
        scenario().run().unwrap();
    }

    #[test]
    fn test_region_removal_releases_damping() {
        region_removal_scenario().run().unwrap();
    }
}

mod effective_damping {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("effective_damping")
            .step(
                "create_region",
                |s| s.create_region("ElementRegion", params! {}),
                |a| a.created(1),
            )
            .step(
                "nothing_applies",
                |s| s.effective_damping(Tag::new(1)),
                |a| a.resolved(None),
            )
            .step(
                "uninitialized",
                |s| s.region_state(Tag::new(1)),
                |a| a.state(RegionState::Uninitialized),
            )
            .step(
                "global_damping",
                |s| {
                    let damping = s.create_damping("Rayleigh", params! { "beta_k" => 0.002 })?;
                    s.regions().assign_damping(Tag::FIXED, Some(damping))
                },
                |a| a.ok(),
            )
            .step(
                "falls_back_to_global",
                |s| s.effective_damping(Tag::new(1)),
                |a| a.resolved(Some(1)),
            )
            .step(
                "own_damping",
                |s| {
                    let damping = s.create_damping(
                        "Uniform",
                        params! { "damping_ratio" => 0.02, "freq_lower" => 0.5, "freq_upper" => 25.0 },
                    )?;
                    s.assign_damping(Tag::new(1), Some(damping))
                },
                |a| a.ok(),
            )
            .step(
                "own_takes_precedence",
                |s| s.effective_damping(Tag::new(1)),
                |a| a.resolved(Some(2)),
            )
            .step(
                "configured",
                |s| s.region_state(Tag::new(1)),
                |a| a.state(RegionState::Configured),
            )
    }

    #[test]
    fn test_region_falls_back_to_global_damping() {
        scenario().run().unwrap();
    }
}

mod damping_catalog {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("damping_catalog")
            .step(
                "frequencies_out_of_order",
                |s| {
                    s.create_damping(
                        "FrequencyRayleigh",
                        params! { "damping_factor" => 0.05, "f1" => 10.0, "f2" => 1.0 },
                    )
                },
                |a| a.fields(&["f1", "f2"]).error("must be strictly increasing"),
            )
            .step(
                "negative_beta",
                |s| s.create_damping("SecStif", params! { "beta" => -0.1 }),
                |a| a.fields(&["beta"]).error("out of range"),
            )
            .step(
                "modal_factors",
                |s| {
                    s.create_damping(
                        "Modal",
                        params! { "num_modes" => 3i64, "damping_factors" => [0.02, 0.03, 1.5] },
                    )
                },
                |a| a.fields(&["damping_factors"]).error("out of range"),
            )
            .step(
                "missing_required",
                |s| s.create_damping("Uniform", params! { "damping_ratio" => 0.02 }),
                |a| {
                    a.fields(&["freq_lower", "freq_upper"])
                        .error("missing required parameter")
                        .count(ComponentKind::Damping, 0)
                },
            )
    }

    #[test]
    fn test_damping_domains() {
        scenario().run().unwrap();
    }
}
