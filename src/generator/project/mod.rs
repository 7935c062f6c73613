mod generate;

pub use generate::{
    build_inputs, generate_entity, inspect_entity, load_model, print_summary, render_artifacts,
    EntityInspection, GenerateOptions, GenerationReport, InspectedField, PatchOutcome,
    RenderedArtifact,
};
