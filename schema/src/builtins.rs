//! Built-in variant catalog.
//!
//! Parameter names use snake_case; the schema order of each variant is the
//! argument order handed to the solver.

use crate::{CatalogBuilder, ConflictPolicy, KindPolicy, ParamDef, SchemaResult};
use femcat_core::{ComponentKind, Tag, Value};

/// Variant name of the fixed Global region.
pub const GLOBAL_REGION: &str = "GlobalRegion";

/// Region parameter names.
pub mod region {
    pub const ELEMENTS: &str = "elements";
    pub const ELEMENT_RANGE: &str = "element_range";
    pub const ELEMENT_ONLY: &str = "element_only";
    pub const NODES: &str = "nodes";
    pub const NODE_RANGE: &str = "node_range";
    pub const DAMPING: &str = "damping";
}

/// Register every built-in kind policy and variant.
pub fn register_all(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    register_essentials(builder)?;
    register_constraint_handlers(builder)?;
    register_numberers(builder)?;
    register_systems(builder)?;
    register_patterns(builder)?;
    register_dampings(builder)?;
    register_regions(builder)?;
    Ok(())
}

/// Register what every session needs regardless of catalog: the kind
/// policies and the fixed Global region.
pub fn register_essentials(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    builder.kind_policy(
        ComponentKind::Numberer,
        KindPolicy::Singleton(ConflictPolicy::Replace),
    );
    builder
        .add_variant(ComponentKind::Region, GLOBAL_REGION)
        .doc("The whole model")
        .fixed(Tag::FIXED)
        .param(ParamDef::reference(region::DAMPING, ComponentKind::Damping))
        .done()
}

fn register_constraint_handlers(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::ConstraintHandler as K;

    builder
        .add_variant(K, "Plain")
        .doc("Homogeneous single-point constraints only")
        .done()?;
    builder
        .add_variant(K, "Transformation")
        .doc("Transformation method for multi-point constraints")
        .done()?;
    builder
        .add_variant(K, "Penalty")
        .doc("Penalty method")
        .param(
            ParamDef::float("alpha_s")
                .with_default(1.0e6)
                .positive()
                .with_doc("penalty factor for single-point constraints"),
        )
        .param(
            ParamDef::float("alpha_m")
                .with_default(1.0e6)
                .positive()
                .with_doc("penalty factor for multi-point constraints"),
        )
        .done()?;
    builder
        .add_variant(K, "Lagrange")
        .doc("Lagrange multiplier method")
        .param(ParamDef::float("alpha_s").with_default(1.0).positive())
        .param(ParamDef::float("alpha_m").with_default(1.0).positive())
        .done()?;
    builder
        .add_variant(K, "Auto")
        .doc("Automatic penalty selection")
        .param(ParamDef::bool("verbose").with_default(false))
        .param(ParamDef::float("auto_penalty").positive())
        .param(ParamDef::float("user_penalty").positive())
        .exclusive(["auto_penalty", "user_penalty"])
        .done()?;
    Ok(())
}

fn register_numberers(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::Numberer as K;

    for (name, doc) in [
        ("Plain", "Numbering in node order"),
        ("RCM", "Reverse Cuthill-McKee"),
        ("AMD", "Approximate minimum degree"),
        ("ParallelPlain", "Plain numbering across partitions"),
        ("ParallelRCM", "Reverse Cuthill-McKee across partitions"),
    ] {
        builder.add_variant(K, name).doc(doc).done()?;
    }
    Ok(())
}

fn register_systems(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::System as K;

    for name in [
        "BandGeneral",
        "BandSPD",
        "ProfileSPD",
        "SuperLU",
        "Umfpack",
        "FullGeneral",
        "SparseSYM",
    ] {
        builder.add_variant(K, name).done()?;
    }
    builder
        .add_variant(K, "Mumps")
        .doc("Parallel sparse direct solver")
        .param(
            ParamDef::float("icntl14")
                .with_default(20.0)
                .non_negative()
                .with_doc("percentage increase of estimated working space"),
        )
        .param(
            ParamDef::int("icntl7")
                .with_default(7i64)
                .with_allowed_values((0..=7).map(Value::Int).collect())
                .with_doc("ordering method"),
        )
        .done()?;
    Ok(())
}

fn register_patterns(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::Pattern as K;

    builder
        .add_variant(K, "UniformExcitation")
        .doc("Uniform base acceleration")
        .param(
            ParamDef::int("dof")
                .required()
                .with_range(Some(Value::Int(1)), Some(Value::Int(6))),
        )
        .param(
            ParamDef::int("time_series")
                .required()
                .with_range(Some(Value::Int(1)), None),
        )
        .param(ParamDef::float("vel0").with_default(0.0))
        .param(ParamDef::float("factor").with_default(1.0))
        .done()?;
    builder
        .add_variant(K, "H5DRM")
        .doc("Domain reduction method input from an H5DRM dataset")
        .param(
            ParamDef::string("filepath")
                .required()
                .with_match_pattern(r"\.h5drm$"),
        )
        .param(ParamDef::float("factor").with_default(1.0))
        .param(ParamDef::float("crd_scale").with_default(1.0).positive())
        .param(
            ParamDef::float("distance_tolerance")
                .with_default(1.0e-3)
                .positive(),
        )
        .param(ParamDef::bool("do_coordinate_transformation").with_default(true))
        .param(ParamDef::float_list("transform_matrix").with_exact_length(9))
        .param(ParamDef::float_list("origin").with_exact_length(3))
        .done()?;
    builder
        .add_variant(K, "Plain")
        .doc("Loads scaled by a time series")
        .param(
            ParamDef::int("time_series")
                .required()
                .with_range(Some(Value::Int(1)), None),
        )
        .param(ParamDef::float("factor").with_default(1.0))
        .done()?;
    Ok(())
}

fn register_dampings(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::Damping as K;

    let ratio = |name: &str| {
        ParamDef::float(name)
            .required()
            .with_range(Some(Value::Float(0.0)), Some(Value::Float(1.0)))
    };

    builder
        .add_variant(K, "Rayleigh")
        .doc("Mass and stiffness proportional damping")
        .param(ParamDef::float("alpha_m").with_default(0.0).non_negative())
        .param(ParamDef::float("beta_k").with_default(0.0).non_negative())
        .param(ParamDef::float("beta_k_init").with_default(0.0).non_negative())
        .param(ParamDef::float("beta_k_comm").with_default(0.0).non_negative())
        .done()?;
    builder
        .add_variant(K, "FrequencyRayleigh")
        .doc("Rayleigh damping from a target ratio at two frequencies")
        .param(ratio("damping_factor"))
        .param(ParamDef::float("f1").required().positive())
        .param(ParamDef::float("f2").required().positive())
        .ordered("f1", "f2")
        .done()?;
    builder
        .add_variant(K, "Uniform")
        .doc("Frequency-independent damping over a band")
        .param(ratio("damping_ratio"))
        .param(ParamDef::float("freq_lower").required().positive())
        .param(ParamDef::float("freq_upper").required().positive())
        .ordered("freq_lower", "freq_upper")
        .done()?;
    builder
        .add_variant(K, "SecStif")
        .doc("Secant stiffness proportional damping")
        .param(ParamDef::float("beta").required().non_negative())
        .done()?;
    builder
        .add_variant(K, "Modal")
        .doc("Modal damping")
        .param(
            ParamDef::int("num_modes")
                .required()
                .with_range(Some(Value::Int(1)), None),
        )
        .param(
            ParamDef::float_list("damping_factors")
                .required()
                .with_min_length(1)
                .with_range(Some(Value::Float(0.0)), Some(Value::Float(1.0))),
        )
        .done()?;
    Ok(())
}

fn register_regions(builder: &mut CatalogBuilder) -> SchemaResult<()> {
    use ComponentKind::Region as K;

    builder
        .add_variant(K, "ElementRegion")
        .doc("A set of elements")
        .param(ParamDef::int_list(region::ELEMENTS).non_negative())
        .param(ParamDef::range(region::ELEMENT_RANGE).non_negative())
        .param(ParamDef::bool(region::ELEMENT_ONLY).with_default(false))
        .param(ParamDef::reference(region::DAMPING, ComponentKind::Damping))
        .exclusive([region::ELEMENTS, region::ELEMENT_RANGE])
        .done()?;
    builder
        .add_variant(K, "NodeRegion")
        .doc("A set of nodes")
        .param(ParamDef::int_list(region::NODES).non_negative())
        .param(ParamDef::range(region::NODE_RANGE).non_negative())
        .param(ParamDef::reference(region::DAMPING, ComponentKind::Damping))
        .exclusive([region::NODES, region::NODE_RANGE])
        .done()?;
    Ok(())
}
