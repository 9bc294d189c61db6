//! Canvas → editor transition.
//!
//! Replaces the timeline's tracks with the projection of the current graph.
//! Clips are attached through `update_track`, so the whole transition adds
//! no undo steps.

use std::collections::HashSet;

use studio_app_state::TrackUpdate;
use studio_common::new_id;
use studio_node_graph::map_flows_to_timeline;

use crate::studio::{Studio, ViewMode};

/// What `open_editor` did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryReport {
    pub flows: usize,
    pub tracks_added: usize,
    pub clips_attached: usize,
}

impl Studio {
    /// Project the graph onto the timeline and switch to the editor.
    ///
    /// All tracks but the first are dropped, one track per projected video
    /// is appended, and the surviving original track is removed once at
    /// least one track was added. With nothing to project, the first
    /// original track is all that remains.
    pub fn open_editor(&mut self) -> EntryReport {
        let flows = self.graph.flows();
        let projection = map_flows_to_timeline(&flows, &self.config.layout);
        let flow_count = flows.len();

        let previous: Vec<String> = self.timeline.tracks().iter().map(|t| t.id.clone()).collect();
        for track_id in previous.iter().skip(1).rev() {
            self.timeline.remove_track(track_id);
        }

        let mut report = EntryReport {
            flows: flow_count,
            ..EntryReport::default()
        };
        for projected in &projection.tracks {
            let clips: Vec<_> = projection
                .clips_for(&projected.id)
                .cloned()
                .map(|draft| draft.into_clip(new_id("clip")))
                .collect();
            report.clips_attached += clips.len();

            let track_id = self.timeline.add_track(projected.kind);
            self.timeline.update_track(
                &track_id,
                TrackUpdate {
                    name: Some(projected.name.clone()),
                    clips: Some(clips),
                    ..TrackUpdate::default()
                },
            );
            report.tracks_added += 1;
        }

        if report.tracks_added > 0 {
            let previous: HashSet<&str> = previous.iter().map(String::as_str).collect();
            let leftover = self
                .timeline
                .tracks()
                .iter()
                .find(|t| previous.contains(t.id.as_str()))
                .map(|t| t.id.clone());
            if let Some(track_id) = leftover {
                self.timeline.remove_track(&track_id);
            }
        }

        self.timeline.set_playing(false);
        self.set_view_mode(ViewMode::Editor);

        tracing::info!(
            flows = report.flows,
            tracks = report.tracks_added,
            clips = report.clips_attached,
            "Entered editor"
        );
        report
    }
}
