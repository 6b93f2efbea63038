//! # Generation Pipeline
//!
//! Drives a parsed [`Recipe`] end to end: one base-generation stage, one
//! stage per operator (already stored in application order), and an optional
//! final canonicalization stage. Each stage boundary is reported through a
//! [`ProgressObserver`], so interactive front ends can show intermediate
//! meshes while a long recipe runs.
//!
//! Any stage failure aborts the run wrapped with the stage identifier; no
//! partially built mesh is ever delivered.

use std::sync::mpsc;

use log::debug;
use serde::{Deserialize, Serialize};

use conway_notation::Recipe;

use crate::bases;
use crate::canonical;
use crate::error::{ConwayError, Result};
use crate::exec::ExecConfig;
use crate::mesh::Mesh;
use crate::ops;

// =============================================================================
// PROGRESS EVENTS
// =============================================================================

/// Summary of a mesh at a stage boundary, cheap to send across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    /// Accumulated recipe name, e.g. `"dC"`.
    pub name: String,
    /// Vertex count after the stage.
    pub vertex_count: usize,
    /// Face count after the stage.
    pub face_count: usize,
    /// Identifier of the stage that produced this mesh.
    pub stage: String,
}

impl MeshSnapshot {
    fn of(mesh: &Mesh, stage: &str) -> Self {
        Self {
            name: mesh.name().to_string(),
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            stage: stage.to_string(),
        }
    }
}

/// A progress event emitted while a recipe runs.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A stage is about to run.
    StageStarted {
        /// Stage identifier: base name, operator identifier, or `"canonicalize"`.
        stage: String,
    },
    /// A stage finished; the snapshot summarizes its output.
    StageCompleted { snapshot: MeshSnapshot },
    /// The whole recipe finished; carries the final mesh.
    Completed { mesh: Mesh },
}

/// Receiver of pipeline progress events.
pub trait ProgressObserver {
    fn on_event(&self, event: PipelineEvent);
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {
    fn on_event(&self, _event: PipelineEvent) {}
}

/// Observer that forwards events into an `mpsc` channel.
///
/// A disconnected receiver is not an error; remaining events are dropped so
/// an abandoned consumer cannot fail a run.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::Sender<PipelineEvent>,
}

impl ChannelObserver {
    pub fn new(sender: mpsc::Sender<PipelineEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_event(&self, event: PipelineEvent) {
        let _ = self.sender.send(event);
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Options controlling a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Number of final canonicalization iterations; `None` skips the stage.
    pub canonicalize: Option<usize>,
    /// Parallel execution configuration shared by all stages.
    pub exec: ExecConfig,
}

/// Executes recipes stage by stage.
///
/// ## Example
///
/// ```rust
/// use conway_mesh::{NullObserver, Pipeline, PipelineOptions};
///
/// let recipe = conway_notation::parse("dC").unwrap();
/// let mesh = Pipeline::new(PipelineOptions::default())
///     .run(&recipe, &NullObserver)
///     .unwrap();
/// assert_eq!(mesh.name(), "dC");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    /// Creates a pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Runs a recipe to completion.
    pub fn run(&self, recipe: &Recipe, observer: &dyn ProgressObserver) -> Result<Mesh> {
        let cfg = &self.options.exec;

        let base_stage = recipe.base.name();
        observer.on_event(PipelineEvent::StageStarted {
            stage: base_stage.clone(),
        });
        let mut mesh = bases::generate(&recipe.base, cfg)?;
        debug!(
            "base stage '{base_stage}': {} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );
        observer.on_event(PipelineEvent::StageCompleted {
            snapshot: MeshSnapshot::of(&mesh, &base_stage),
        });

        for op in &recipe.ops {
            let stage = op.identifier();
            observer.on_event(PipelineEvent::StageStarted {
                stage: stage.clone(),
            });
            mesh = ops::apply(op, &mesh, cfg)?;
            debug!(
                "operator stage '{stage}': {} vertices, {} faces",
                mesh.vertex_count(),
                mesh.face_count()
            );
            observer.on_event(PipelineEvent::StageCompleted {
                snapshot: MeshSnapshot::of(&mesh, &stage),
            });
        }

        if let Some(iterations) = self.options.canonicalize {
            let stage = "canonicalize";
            observer.on_event(PipelineEvent::StageStarted {
                stage: stage.to_string(),
            });
            mesh = canonical::canonicalize(&mesh, iterations, cfg)
                .map_err(|source| ConwayError::in_operator(stage, source))?;
            observer.on_event(PipelineEvent::StageCompleted {
                snapshot: MeshSnapshot::of(&mesh, stage),
            });
        }

        observer.on_event(PipelineEvent::Completed { mesh: mesh.clone() });
        Ok(mesh)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Test observer recording every event in order.
    struct Recorder {
        events: RefCell<Vec<PipelineEvent>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
            }
        }
    }

    impl ProgressObserver for Recorder {
        fn on_event(&self, event: PipelineEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn test_event_sequence_for_short_recipe() {
        let recipe = conway_notation::parse("dC").unwrap();
        let recorder = Recorder::new();
        let mesh = Pipeline::new(PipelineOptions::default())
            .run(&recipe, &recorder)
            .unwrap();
        assert_eq!(mesh.name(), "dC");

        let events = recorder.events.borrow();
        assert_eq!(events.len(), 5);
        assert!(matches!(&events[0], PipelineEvent::StageStarted { stage } if stage == "C"));
        match &events[1] {
            PipelineEvent::StageCompleted { snapshot } => {
                assert_eq!(snapshot.stage, "C");
                assert_eq!(snapshot.vertex_count, 8);
                assert_eq!(snapshot.face_count, 6);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(&events[2], PipelineEvent::StageStarted { stage } if stage == "d"));
        match &events[3] {
            PipelineEvent::StageCompleted { snapshot } => {
                assert_eq!(snapshot.stage, "d");
                assert_eq!(snapshot.name, "dC");
                assert_eq!(snapshot.vertex_count, 6);
                assert_eq!(snapshot.face_count, 8);
            }
            other => panic!("unexpected event {other:?}"),
        }
        match &events[4] {
            PipelineEvent::Completed { mesh } => assert_eq!(mesh.name(), "dC"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_canonicalize_stage_is_optional() {
        let recipe = conway_notation::parse("kT").unwrap();
        let recorder = Recorder::new();
        let options = PipelineOptions {
            canonicalize: Some(2),
            ..PipelineOptions::default()
        };
        let mesh = Pipeline::new(options).run(&recipe, &recorder).unwrap();
        assert_eq!(mesh.name(), "kT");

        let events = recorder.events.borrow();
        let canonical_stages = events
            .iter()
            .filter(|e| matches!(e, PipelineEvent::StageStarted { stage } if stage == "canonicalize"))
            .count();
        assert_eq!(canonical_stages, 1);
    }

    #[test]
    fn test_channel_observer_delivers_events() {
        let (sender, receiver) = mpsc::channel();
        let recipe = conway_notation::parse("aC").unwrap();
        Pipeline::new(PipelineOptions::default())
            .run(&recipe, &ChannelObserver::new(sender))
            .unwrap();
        let events: Vec<_> = receiver.try_iter().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events.last(), Some(PipelineEvent::Completed { .. })));
    }

    #[test]
    fn test_channel_observer_survives_dropped_receiver() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let recipe = conway_notation::parse("C").unwrap();
        let result = Pipeline::new(PipelineOptions::default())
            .run(&recipe, &ChannelObserver::new(sender));
        assert!(result.is_ok());
    }

    #[test]
    fn test_stage_failure_carries_identifier() {
        // The parser rejects a zero subdivision level, so force one through
        // the AST directly.
        let mut recipe = conway_notation::parse("uT").unwrap();
        recipe.ops = vec![conway_notation::OpSpec::Trisub { n: 0 }];
        let err = Pipeline::new(PipelineOptions::default())
            .run(&recipe, &NullObserver)
            .unwrap_err();
        assert!(matches!(err, ConwayError::Operator { .. }));
        assert!(err.to_string().contains("'u0'"));
    }
}
