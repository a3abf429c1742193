use std::time::Duration;

use crate::amazons_move::AmazonsMove;
use crate::board::side::Side;
use crate::evaluate::owned_tiles;
use crate::game::display::GameDisplay;
use crate::game::engine::{Engine, EngineStats};
use crate::game::session::PlayerKind;

pub trait GameRenderer {
    fn render(
        &self,
        ui: &mut GameDisplay,
        engine: &Engine,
        current_turn: Side,
        last_move: Option<&AmazonsMove>,
    );
    fn frame_delay(&self) -> Option<Duration>;
}

pub fn format_stats(stats: &EngineStats) -> String {
    format!(
        "* Score: {}\n* Nodes created: {}, visited: {} (depth: {}, tree size: {})\n* Leaf evaluations: {}, cutoffs: {}\n* Tasks: {} (max concurrent: {})\n* Move took: {}",
        stats.last_score.map_or("-".to_string(), |s| s.to_string()),
        stats.nodes_created,
        stats.nodes_visited,
        stats.depth,
        stats.tree_size,
        stats.leaf_evaluations,
        stats.cutoffs,
        stats.tasks_spawned,
        stats.max_concurrent_tasks,
        stats
            .last_search_duration
            .map_or("-".to_string(), |d| format!("{:?}", d))
    )
}

/// Stats block plus the current territory split, as shown under the board.
fn stats_panel(engine: &Engine) -> String {
    let mut panel = format_stats(&engine.get_search_stats());
    if let Ok(snapshot) = engine.head_snapshot() {
        panel.push_str(&format!(
            "\n* Territory: A {}, B {}",
            owned_tiles(&snapshot, Side::A).len(),
            owned_tiles(&snapshot, Side::B).len()
        ));
    }
    panel
}

pub struct SimpleRenderer;

impl GameRenderer for SimpleRenderer {
    fn render(
        &self,
        ui: &mut GameDisplay,
        engine: &Engine,
        current_turn: Side,
        last_move: Option<&AmazonsMove>,
    ) {
        ui.render_game_state(engine.board(), current_turn, last_move, None);
        println!("Enter your move (row,col->row,col/row,col, 'engine' or 'quit'):");
    }

    fn frame_delay(&self) -> Option<Duration> {
        None
    }
}

pub struct StatsRenderer {
    pub delay_between_moves: Option<Duration>,
}

impl GameRenderer for StatsRenderer {
    fn render(
        &self,
        ui: &mut GameDisplay,
        engine: &Engine,
        current_turn: Side,
        last_move: Option<&AmazonsMove>,
    ) {
        let stats_display = stats_panel(engine);
        ui.render_game_state(engine.board(), current_turn, last_move, Some(&stats_display));
    }

    fn frame_delay(&self) -> Option<Duration> {
        self.delay_between_moves
    }
}

/// Stats after every move, prompting only when a human is to move.
pub struct ConditionalStatsRenderer;

impl GameRenderer for ConditionalStatsRenderer {
    fn render(
        &self,
        ui: &mut GameDisplay,
        engine: &Engine,
        current_turn: Side,
        last_move: Option<&AmazonsMove>,
    ) {
        let stats_display = stats_panel(engine);
        ui.render_game_state(engine.board(), current_turn, last_move, Some(&stats_display));
        if engine.session().current_player() == PlayerKind::Human {
            println!("Enter your move (row,col->row,col/row,col, 'engine' or 'quit'):");
        }
    }

    fn frame_delay(&self) -> Option<Duration> {
        None
    }
}
