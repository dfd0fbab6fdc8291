//! Match engine — the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, processes player commands, runs
//! all systems, and produces `MatchSnapshot`s. Completely headless (no
//! rendering or audio dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_ai::profiles::{
    self, MovePlan, NPC_DOUBLE_COOLDOWN, NPC_SHIELD_COOLDOWN,
};
use barrage_ai::search::{apply_inaccuracy, plan_shot, AimContext};
use barrage_core::commands::PlayerCommand;
use barrage_core::components::{Shell, Tank};
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::events::GameEvent;
use barrage_core::state::{FireParams, MatchSnapshot, ScoreView};
use barrage_core::types::{Position, SimTime};
use barrage_terrain::{generate, TerrainField};

use crate::match_setup;
use crate::scheduler::{DeferredAction, Scheduler};
use crate::systems;
use crate::systems::collision::Impact;
use crate::systems::snapshot::SnapshotHeader;

/// Configuration for a new engine.
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Running score across a PvE run (or a single PvP match).
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub shots_fired: u32,
    /// Damage dealt by player 1.
    pub damage_dealt: f64,
    pub levels_cleared: u32,
}

impl ScoreState {
    /// Aggregate points used for the ranking board.
    pub fn points(&self) -> u64 {
        self.levels_cleared as u64 * 1000 + self.damage_dealt as u64
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            shots_fired: self.shots_fired,
            damage_dealt: self.damage_dealt,
            levels_cleared: self.levels_cleared,
            points: self.points(),
        }
    }
}

/// The computer's active repositioning burst, advanced one tick at a time.
#[derive(Debug, Clone, Copy)]
struct NpcMove {
    direction: MoveDir,
    ticks_remaining: u32,
}

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    world: World,
    terrain: Option<TerrainField>,
    time: SimTime,
    phase: MatchPhase,
    mode: GameMode,
    stage: TurnStage,
    current_player: PlayerId,
    turn_count: u32,
    wind: f64,
    npc_level: u32,
    winner: Option<PlayerId>,
    field_width: f64,
    field_height: f64,
    classes: [TankClass; 2],
    last_fire: [FireParams; 2],
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    scheduler: Scheduler,
    /// Match generation, bumped on every (re)start. Deferred actions from
    /// older generations never fire.
    generation: u64,
    npc_move: Option<NpcMove>,
    score: ScoreState,
    despawn_buffer: Vec<hecs::Entity>,
}

impl MatchEngine {
    /// Create a new engine in the menu phase.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            world: World::new(),
            terrain: None,
            time: SimTime::default(),
            phase: MatchPhase::default(),
            mode: GameMode::default(),
            stage: TurnStage::default(),
            current_player: PlayerId::One,
            turn_count: 0,
            wind: 0.0,
            npc_level: 1,
            winner: None,
            field_width: 0.0,
            field_height: 0.0,
            classes: [TankClass::default(); 2],
            last_fire: default_fire_params(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            scheduler: Scheduler::default(),
            generation: 0,
            npc_move: None,
            score: ScoreState::default(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.process_commands();

        if self.phase != MatchPhase::Menu {
            self.run_scheduled();
            if self.phase == MatchPhase::Active {
                self.run_systems();
            }
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        let header = SnapshotHeader {
            time: self.time,
            phase: self.phase,
            mode: self.mode,
            stage: self.stage,
            current_player: self.current_player,
            turn_count: self.turn_count,
            wind: self.wind,
            npc_level: self.npc_level,
            last_fire: self.last_fire,
            winner: self.winner,
        };
        systems::snapshot::build_snapshot(
            &self.world,
            self.terrain.as_ref(),
            header,
            &self.score,
            events,
        )
    }

    // ---- Accessors ----

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn wind(&self) -> f64 {
        self.wind
    }

    pub fn npc_level(&self) -> u32 {
        self.npc_level
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // ---- Test helpers ----

    /// Mutable world access for tests that stage bespoke situations.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[cfg(test)]
    pub fn terrain_mut(&mut self) -> Option<&mut TerrainField> {
        self.terrain.as_mut()
    }

    /// Replace the terrain wholesale (tests that need an exact profile).
    #[cfg(test)]
    pub fn set_terrain(&mut self, terrain: TerrainField) {
        self.terrain = Some(terrain);
    }

    #[cfg(test)]
    pub fn set_wind(&mut self, wind: f64) {
        self.wind = wind;
    }

    #[cfg(test)]
    pub fn set_tank_health(&mut self, player: PlayerId, health: f64) {
        if let Some(entity) = self.tank_entity(player) {
            if let Ok(mut tank) = self.world.get::<&mut Tank>(entity) {
                tank.health = health;
            }
        }
    }

    #[cfg(test)]
    pub fn tank(&self, player: PlayerId) -> Option<Tank> {
        let entity = self.tank_entity(player)?;
        self.world.get::<&Tank>(entity).ok().map(|t| (*t).clone())
    }

    // ---- Command handling ----

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartMatch {
                width,
                height,
                mode,
                classes,
            } => self.start_match(width, height, mode, classes),
            PlayerCommand::Fire {
                player,
                angle,
                power,
            } => self.try_fire(player, angle, power),
            PlayerCommand::Move { player, direction } => {
                if self.phase == MatchPhase::Active && self.stage == TurnStage::Aiming {
                    self.move_tank(player, direction);
                }
            }
            PlayerCommand::Jump { player } => {
                if self.phase == MatchPhase::Active && self.stage == TurnStage::Aiming {
                    self.jump_tank(player);
                }
            }
            PlayerCommand::UseSkill { player, skill } => self.try_skill(player, skill),
            PlayerCommand::ReturnToMenu => self.return_to_menu(),
        }
    }

    /// Begin a fresh run: level and score reset, then the first level starts.
    fn start_match(&mut self, width: f64, height: f64, mode: GameMode, classes: [TankClass; 2]) {
        if width < 1.0 || height < 1.0 {
            return;
        }
        self.field_width = width;
        self.field_height = height;
        self.mode = mode;
        self.classes = classes;
        self.npc_level = 1;
        self.score = ScoreState::default();
        self.begin_level();
    }

    /// (Re)build the world for the current level. Score and level survive;
    /// everything else resets.
    fn begin_level(&mut self) {
        self.generation += 1;
        self.scheduler.clear();
        self.world.clear();
        self.npc_move = None;
        self.winner = None;
        self.phase = MatchPhase::Active;
        self.stage = TurnStage::Aiming;
        self.current_player = PlayerId::One;
        self.turn_count = 0;
        self.time = SimTime::default();
        self.last_fire = default_fire_params();

        let kind = match self.mode {
            GameMode::Pvp => generate::random_kind(&mut self.rng),
            GameMode::Pve => generate::kind_for_level(self.npc_level),
        };
        let terrain = generate::generate(
            self.field_width as usize,
            self.field_height,
            kind,
            &mut self.rng,
        );

        match_setup::spawn_tanks(&mut self.world, &terrain, self.field_width, self.classes);
        if self.mode == GameMode::Pve {
            let profile = profiles::profile_for_level(self.npc_level);
            match_setup::apply_npc_profile(&mut self.world, &profile);
        }
        self.terrain = Some(terrain);

        self.resample_wind();

        log::info!(
            "match started: mode {:?}, terrain {:?}, level {}",
            self.mode,
            kind,
            self.npc_level
        );
    }

    fn return_to_menu(&mut self) {
        self.generation += 1;
        self.scheduler.clear();
        self.world.clear();
        self.terrain = None;
        self.npc_move = None;
        self.winner = None;
        self.phase = MatchPhase::Menu;
        self.stage = TurnStage::Aiming;
    }

    /// Fire a shell for `player`. Silently ignored unless it is that
    /// player's turn, the match is active, and no shell is in flight.
    fn try_fire(&mut self, player: PlayerId, angle: f64, power: f64) {
        if self.phase != MatchPhase::Active
            || self.stage != TurnStage::Aiming
            || player != self.current_player
            || self.shell_exists()
        {
            return;
        }
        let Some(entity) = self.tank_entity(player) else {
            return;
        };
        let power = power.min(MAX_FIRE_POWER);
        if power <= 0.0 {
            return;
        }

        self.last_fire[player_index(player)] = FireParams { angle, power };

        let (muzzle, damage_mult, is_double) = {
            let Ok(mut tank) = self.world.get::<&mut Tank>(entity) else {
                return;
            };
            let Ok(mut pos) = self.world.get::<&mut Position>(entity) else {
                return;
            };

            let muzzle = Position::new(
                pos.x + TURRET_LENGTH * angle.cos(),
                pos.y + TURRET_LENGTH * angle.sin(),
            );
            let damage_mult = tank.power_mult;
            let is_double = tank.double_shot;
            tank.double_shot = false;

            // Recoil pushes the hull opposite the barrel.
            pos.x -= angle.cos() * power * RECOIL_FACTOR;
            pos.x = pos.x.clamp(0.0, self.field_width - 1.0);

            (muzzle, damage_mult, is_double)
        };

        match_setup::spawn_shell(
            &mut self.world,
            muzzle,
            angle,
            power,
            player,
            damage_mult,
            is_double,
        );
        self.stage = TurnStage::InFlight;
        self.score.shots_fired += 1;
        self.events.push(GameEvent::ShotFired { player });
        log::debug!(
            "player {} fires: angle {:.2} rad, power {:.0}",
            player.number(),
            angle,
            power
        );
    }

    /// Step a tank sideways, burning fuel. No-op once the tank runs dry.
    fn move_tank(&mut self, player: PlayerId, direction: MoveDir) {
        let Some(entity) = self.tank_entity(player) else {
            return;
        };

        let moved_to = {
            let Ok(mut tank) = self.world.get::<&mut Tank>(entity) else {
                return;
            };
            let Ok(mut pos) = self.world.get::<&mut Position>(entity) else {
                return;
            };
            if tank.fuel <= 0.0 {
                return;
            }
            pos.x = (pos.x + direction.sign() * TANK_MOVE_STEP)
                .clamp(TANK_EDGE_MARGIN, self.field_width - TANK_EDGE_MARGIN);
            tank.fuel -= TANK_MOVE_FUEL_COST;
            pos.x
        };

        if self.rng.gen_bool(TANK_MOVE_DUST_CHANCE) {
            if let Some(terrain) = &self.terrain {
                self.events.push(GameEvent::Dust {
                    x: moved_to,
                    y: terrain.height_at(moved_to),
                });
            }
        }
    }

    /// Hop. Only a grounded tank can jump.
    fn jump_tank(&mut self, player: PlayerId) {
        let Some(entity) = self.tank_entity(player) else {
            return;
        };
        let Ok(mut tank) = self.world.get::<&mut Tank>(entity) else {
            return;
        };
        let Ok(mut pos) = self.world.get::<&mut Position>(entity) else {
            return;
        };
        if tank.on_ground {
            tank.vy = TANK_JUMP_VELOCITY;
            tank.on_ground = false;
            // Lift off the ground so the clamp doesn't re-snap immediately.
            pos.y -= 1.0;
        }
    }

    /// Activate a skill for the acting player, if its cooldown allows.
    fn try_skill(&mut self, player: PlayerId, skill: Skill) {
        if self.phase != MatchPhase::Active
            || self.stage != TurnStage::Aiming
            || player != self.current_player
        {
            return;
        }
        let Some(entity) = self.tank_entity(player) else {
            return;
        };

        let activated = {
            let Ok(mut tank) = self.world.get::<&mut Tank>(entity) else {
                return;
            };
            match skill {
                Skill::Shield if tank.cooldowns.shield == 0 => {
                    tank.shield = true;
                    tank.cooldowns.shield = SHIELD_COOLDOWN_TURNS;
                    true
                }
                Skill::DoubleShot if tank.cooldowns.double_shot == 0 => {
                    tank.double_shot = true;
                    tank.cooldowns.double_shot = DOUBLE_SHOT_COOLDOWN_TURNS;
                    true
                }
                _ => false,
            }
        };

        if activated {
            self.events.push(GameEvent::SkillActivated { player, skill });
        }
    }

    // ---- Scheduled actions ----

    fn run_scheduled(&mut self) {
        for action in self.scheduler.take_due(self.time.tick, self.generation) {
            match action {
                DeferredAction::NpcTakeTurn => self.npc_take_turn(),
                DeferredAction::NpcFire => self.npc_fire(),
                DeferredAction::AdvanceLevel => self.advance_level(),
            }
        }
    }

    /// Whether the computer may act right now. Deferred actions re-check
    /// this because the match can move on underneath them.
    fn npc_may_act(&self) -> bool {
        self.phase == MatchPhase::Active
            && self.mode == GameMode::Pve
            && self.current_player == PlayerId::Two
            && self.stage == TurnStage::Aiming
    }

    /// The computer opens its turn: roll skills and maybe reposition.
    fn npc_take_turn(&mut self) {
        if !self.npc_may_act() {
            return;
        }
        let Some(entity) = self.tank_entity(PlayerId::Two) else {
            return;
        };

        let (health, shield_ready, double_ready) = {
            let Ok(tank) = self.world.get::<&Tank>(entity) else {
                return;
            };
            (
                tank.health,
                tank.cooldowns.shield == 0,
                tank.cooldowns.double_shot == 0,
            )
        };

        let opening = profiles::plan_turn_opening(health, shield_ready, double_ready, &mut self.rng);

        if opening.use_shield || opening.use_double {
            if let Ok(mut tank) = self.world.get::<&mut Tank>(entity) {
                if opening.use_shield {
                    tank.shield = true;
                    tank.cooldowns.shield = NPC_SHIELD_COOLDOWN;
                }
                if opening.use_double {
                    tank.double_shot = true;
                    tank.cooldowns.double_shot = NPC_DOUBLE_COOLDOWN;
                }
            }
            if opening.use_shield {
                self.events.push(GameEvent::SkillActivated {
                    player: PlayerId::Two,
                    skill: Skill::Shield,
                });
            }
            if opening.use_double {
                self.events.push(GameEvent::SkillActivated {
                    player: PlayerId::Two,
                    skill: Skill::DoubleShot,
                });
            }
        }

        match opening.movement {
            Some(MovePlan {
                direction,
                duration_ticks,
            }) => {
                self.npc_move = Some(NpcMove {
                    direction,
                    ticks_remaining: duration_ticks,
                });
            }
            None => {
                self.scheduler.schedule(
                    self.time.tick + NPC_FIRE_DELAY_TICKS,
                    self.generation,
                    DeferredAction::NpcFire,
                );
            }
        }
    }

    /// Advance the computer's repositioning burst one tick.
    fn advance_npc_movement(&mut self) {
        let Some(mut npc_move) = self.npc_move.take() else {
            return;
        };
        if !self.npc_may_act() {
            return;
        }

        self.move_tank(PlayerId::Two, npc_move.direction);
        if self.rng.gen_bool(profiles::NPC_JUMP_CHANCE) {
            self.jump_tank(PlayerId::Two);
        }
        npc_move.ticks_remaining -= 1;

        let out_of_fuel = self
            .tank_entity(PlayerId::Two)
            .and_then(|e| self.world.get::<&Tank>(e).ok().map(|t| t.fuel <= 0.0))
            .unwrap_or(true);

        if npc_move.ticks_remaining == 0 || out_of_fuel {
            self.scheduler.schedule(
                self.time.tick + NPC_FIRE_DELAY_TICKS,
                self.generation,
                DeferredAction::NpcFire,
            );
        } else {
            self.npc_move = Some(npc_move);
        }
    }

    /// The computer runs the shot search and fires with level-scaled jitter.
    fn npc_fire(&mut self) {
        if !self.npc_may_act() {
            return;
        }
        let (Some(npc_entity), Some(target_entity)) = (
            self.tank_entity(PlayerId::Two),
            self.tank_entity(PlayerId::One),
        ) else {
            return;
        };

        let (source, accuracy) = {
            let Ok(pos) = self.world.get::<&Position>(npc_entity) else {
                return;
            };
            let Ok(tank) = self.world.get::<&Tank>(npc_entity) else {
                return;
            };
            (*pos, tank.accuracy)
        };
        let Ok(target) = self.world.get::<&Position>(target_entity).map(|p| *p) else {
            return;
        };

        let ctx = AimContext {
            source,
            target,
            wind: self.wind,
            field_width: self.field_width,
            field_height: self.field_height,
        };
        let plan = plan_shot(&ctx);
        let (angle, power) = apply_inaccuracy(&plan, accuracy, &mut self.rng);

        log::debug!(
            "computer fires: angle {:.0}°, power {:.0} (closest approach {:.0} px)",
            angle.to_degrees(),
            power,
            plan.closest_approach
        );
        self.try_fire(PlayerId::Two, angle, power);
    }

    /// Move to the next PvE level after a player win.
    fn advance_level(&mut self) {
        if self.phase != MatchPhase::GameOver
            || self.mode != GameMode::Pve
            || self.winner != Some(PlayerId::One)
        {
            return;
        }
        self.npc_level += 1;
        log::info!("advancing to level {}", self.npc_level);
        self.begin_level();
    }

    // ---- Systems ----

    fn run_systems(&mut self) {
        self.advance_npc_movement();

        let Some(terrain) = &self.terrain else {
            return;
        };
        systems::tanks::run(&mut self.world, terrain);
        systems::ballistics::run(&mut self.world, self.wind, &mut self.rng, &mut self.events);
        systems::items::fall(&mut self.world, terrain);

        let impact = systems::collision::run(
            &self.world,
            terrain,
            self.field_width,
            self.field_height,
        );

        systems::items::pickups(&mut self.world, &mut self.events);
        systems::items::sweep(&mut self.world, self.field_height, &mut self.despawn_buffer);

        if let Some((shell_entity, impact)) = impact {
            self.resolve_impact(shell_entity, impact);
        }
    }

    /// Act on what the shell struck: craters, damage, and the turn hand-off.
    fn resolve_impact(&mut self, shell_entity: hecs::Entity, impact: Impact) {
        let Ok(shell) = self.world.get::<&Shell>(shell_entity).map(|s| *s) else {
            return;
        };
        let _ = self.world.despawn(shell_entity);
        self.stage = TurnStage::Aiming;

        match impact {
            Impact::OutOfBounds => {
                self.pass_turn();
            }
            Impact::Terrain { x, y } => {
                if let Some(terrain) = &mut self.terrain {
                    terrain.deform(x, y, CRATER_RADIUS);
                }
                self.events.push(GameEvent::Explosion { x, y });
                self.pass_turn();
            }
            Impact::Tank { player, x, y } => {
                self.events.push(GameEvent::Explosion { x, y });
                self.apply_hit(player, &shell);
                if self.phase == MatchPhase::Active {
                    self.pass_turn();
                }
            }
        }
    }

    /// Resolve a direct hit on `target`: shield check, damage roll, death.
    fn apply_hit(&mut self, target: PlayerId, shell: &Shell) {
        let Some(entity) = self.tank_entity(target) else {
            return;
        };

        let (tank_x, tank_y, damage, shielded, dead) = {
            let Ok(mut tank) = self.world.get::<&mut Tank>(entity) else {
                return;
            };
            let Ok(pos) = self.world.get::<&Position>(entity) else {
                return;
            };

            if tank.shield {
                tank.shield = false;
                (pos.x, pos.y, 0.0, true, false)
            } else {
                let roll = (DAMAGE_BASE + self.rng.gen_range(0..DAMAGE_SPREAD)) as f64;
                let mut damage = roll * shell.damage_mult;
                if shell.is_double {
                    damage *= 2.0;
                }
                tank.health = (tank.health - damage).max(0.0);
                (pos.x, pos.y, damage, false, tank.health <= 0.0)
            }
        };

        self.events.push(GameEvent::TankHit {
            player: target,
            damage,
            shielded,
        });

        if shielded {
            // The block still flashes.
            self.events.push(GameEvent::Explosion {
                x: tank_x,
                y: tank_y,
            });
            log::info!("player {}'s shield blocked the hit", target.number());
            return;
        }

        if shell.owner == PlayerId::One {
            self.score.damage_dealt += damage;
        }

        // Smoke pours off the wounded hull.
        for _ in 0..HIT_SMOKE_PUFFS {
            let x = tank_x + (self.rng.gen::<f64>() - 0.5) * HIT_SMOKE_SCATTER_X;
            let y = tank_y + (self.rng.gen::<f64>() - 0.5) * HIT_SMOKE_SCATTER_Y;
            self.events.push(GameEvent::Smoke { x, y });
        }
        log::info!("player {} took {:.0} damage", target.number(), damage);

        if dead {
            self.finish_match(target.opponent());
        }
    }

    /// End the match. A PvE player win schedules the next level instead of
    /// reporting a final result.
    fn finish_match(&mut self, winner: PlayerId) {
        self.phase = MatchPhase::GameOver;
        self.winner = Some(winner);
        log::info!("game over: player {} wins", winner.number());

        if self.mode == GameMode::Pve && winner == PlayerId::One {
            self.score.levels_cleared += 1;
            self.events.push(GameEvent::LevelAdvance {
                level: self.npc_level + 1,
            });
            self.scheduler.schedule(
                self.time.tick + LEVEL_ADVANCE_DELAY_TICKS,
                self.generation,
                DeferredAction::AdvanceLevel,
            );
        } else {
            self.events.push(GameEvent::GameOver {
                winner,
                level: self.npc_level,
                score: self.score.points(),
            });
        }
    }

    /// Hand the turn to the other player: wind cadence, cooldown ticks,
    /// item drop, and the computer's wake-up call.
    fn pass_turn(&mut self) {
        if self.phase != MatchPhase::Active {
            return;
        }
        self.stage = TurnStage::Aiming;
        self.current_player = self.current_player.opponent();
        self.turn_count += 1;

        if self.turn_count % WIND_TURN_INTERVAL == 0 {
            self.resample_wind();
        }

        // The incoming player's cooldowns tick down.
        if let Some(entity) = self.tank_entity(self.current_player) {
            if let Ok(mut tank) = self.world.get::<&mut Tank>(entity) {
                tank.cooldowns.shield = tank.cooldowns.shield.saturating_sub(1);
                tank.cooldowns.double_shot = tank.cooldowns.double_shot.saturating_sub(1);
            }
        }

        self.events.push(GameEvent::TurnChange {
            player: self.current_player,
        });
        log::debug!(
            "turn {} -> player {}",
            self.turn_count,
            self.current_player.number()
        );

        self.maybe_spawn_item();

        if self.mode == GameMode::Pve && self.current_player == PlayerId::Two {
            self.scheduler.schedule(
                self.time.tick + NPC_TURN_DELAY_TICKS,
                self.generation,
                DeferredAction::NpcTakeTurn,
            );
        }
    }

    fn resample_wind(&mut self) {
        self.wind = self.rng.gen_range(-WIND_MAX..WIND_MAX);
        self.events.push(GameEvent::WindShift { wind: self.wind });
    }

    /// Roll the per-turn item drop: 40% chance, scattered near a random tank.
    fn maybe_spawn_item(&mut self) {
        if !self.rng.gen_bool(ITEM_SPAWN_CHANCE) {
            return;
        }

        let tank_xs: Vec<f64> = {
            let mut query = self.world.query::<(&Tank, &Position)>();
            query.iter().map(|(_, (_, pos))| pos.x).collect()
        };
        if tank_xs.is_empty() {
            return;
        }

        let base = tank_xs[self.rng.gen_range(0..tank_xs.len())];
        let offset = (self.rng.gen::<f64>() - 0.5) * (ITEM_SCATTER * 2.0);
        let x = (base + offset).clamp(ITEM_EDGE_MARGIN, self.field_width - ITEM_EDGE_MARGIN);

        let roll: f64 = self.rng.gen();
        let kind = if roll < 0.33 {
            ItemKind::Health
        } else if roll < 0.66 {
            ItemKind::Power
        } else {
            ItemKind::Fuel
        };

        match_setup::spawn_item(&mut self.world, kind, x);
        self.events.push(GameEvent::ItemSpawned { kind, x });
    }

    // ---- Lookups ----

    fn tank_entity(&self, player: PlayerId) -> Option<hecs::Entity> {
        let mut query = self.world.query::<&Tank>();
        query
            .iter()
            .find(|(_, tank)| tank.player == player)
            .map(|(entity, _)| entity)
    }

    fn shell_exists(&self) -> bool {
        let mut query = self.world.query::<&Shell>();
        query.iter().next().is_some()
    }
}

fn player_index(player: PlayerId) -> usize {
    match player {
        PlayerId::One => 0,
        PlayerId::Two => 1,
    }
}

fn default_fire_params() -> [FireParams; 2] {
    [
        FireParams {
            angle: 0.0,
            power: 50.0,
        },
        FireParams {
            angle: std::f64::consts::PI,
            power: 50.0,
        },
    ]
}
