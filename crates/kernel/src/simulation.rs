use arena_input::{Action, InputSnapshot};
use serde::{Deserialize, Serialize};

use crate::behavior;
use crate::config::{ConfigError, GameConfig};
use crate::entity::{DamageOutcome, Owner, Player, Projectile, Target};
use crate::event::SimEvent;
use crate::frame::FrameView;
use crate::movement;
use crate::projectile::{self, Hit};
use crate::rng::SessionRng;
use crate::spawn;

/// Whether the session is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    /// Player health reached zero. State stays inspectable but frozen
    /// until restart.
    Defeated,
}

/// Every mutable entity of a session. Owned by [`Simulation`], which is its
/// only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub tick: u64,
    pub time: f32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub targets: Vec<Target>,
    pub score: u32,
    pub status: SessionStatus,
    /// Static targets placed at session start.
    pub initial_static_targets: usize,
}

impl SimulationState {
    /// Session start: player at spawn, initial layout from `rng`.
    pub fn fresh(config: &GameConfig, rng: &mut SessionRng) -> Self {
        let targets = spawn::initial_targets(config, rng);
        let initial_static_targets = targets.iter().filter(|t| !t.is_hostile()).count();
        Self {
            tick: 0,
            time: 0.0,
            player: Player::spawn(config),
            projectiles: Vec::new(),
            targets,
            score: 0,
            status: SessionStatus::Running,
            initial_static_targets,
        }
    }

    pub fn live_static_targets(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| !t.is_hostile() && t.is_alive())
            .count()
    }

    /// True once every static target placed at start has been destroyed.
    /// Never true for arenas that started without static targets.
    pub fn targets_cleared(&self) -> bool {
        self.initial_static_targets > 0 && self.live_static_targets() == 0
    }
}

/// What one call to [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Integration step actually used, after the cap.
    pub dt: f32,
    pub restarted: bool,
    pub shots_fired: usize,
    pub hits: usize,
    pub kills: usize,
    pub projectiles_removed: usize,
    pub targets_removed: usize,
}

/// The simulation loop. Holds the configuration, the session state and the
/// deterministic RNG; the host calls [`Simulation::tick`] once per frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: GameConfig,
    state: SimulationState,
    rng: SessionRng,
    events: Vec<SimEvent>,
}

impl Simulation {
    /// Validate the configuration and start a session.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = SessionRng::new(config.sim.seed);
        let state = SimulationState::fresh(&config, &mut rng);
        tracing::info!(
            seed = config.sim.seed,
            targets = state.targets.len(),
            "session started"
        );
        Ok(Self {
            config,
            state,
            rng,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn is_defeated(&self) -> bool {
        self.state.status == SessionStatus::Defeated
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Read-only frame for renderers.
    pub fn frame(&self) -> FrameView {
        FrameView::capture(&self.state)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// The step used for `elapsed` wall seconds: clamped to
    /// `[0, max_dt]`, non-finite input treated as 0.
    pub fn clamp_dt(&self, elapsed: f32) -> f32 {
        if elapsed.is_finite() {
            elapsed.clamp(0.0, self.config.sim.max_dt)
        } else {
            0.0
        }
    }

    /// Reset score, health, ammo, projectiles and the target layout.
    ///
    /// The replacement state is built completely before it is swapped in,
    /// so no observer ever sees a half-reset session. The RNG is reseeded,
    /// which reproduces the initial layout exactly.
    pub fn restart(&mut self) {
        let mut rng = SessionRng::new(self.config.sim.seed);
        let fresh = SimulationState::fresh(&self.config, &mut rng);
        self.state = fresh;
        self.rng = rng;
        self.events.push(SimEvent::Restarted);
        tracing::info!("session restarted");
    }

    /// Advance one tick.
    ///
    /// Order: discrete actions and look, movement, player shots and
    /// projectile flight with hit tests, hostile behavior, then compaction
    /// and respawn. A restart request replaces the whole tick. A defeated
    /// session ignores everything but restart.
    pub fn tick(&mut self, elapsed: f32, input: &InputSnapshot) -> TickReport {
        let dt = self.clamp_dt(elapsed);
        let mut report = TickReport {
            dt,
            ..TickReport::default()
        };

        if input.has(Action::Restart) {
            self.restart();
            report.restarted = true;
            return report;
        }
        if self.is_defeated() {
            return report;
        }

        let _span = tracing::info_span!("tick", tick = self.state.tick + 1).entered();
        self.state.tick += 1;
        self.state.time += dt;
        let tick = self.state.tick;
        let config = &self.config;
        let state = &mut self.state;

        movement::update_player(&mut state.player, input, config, dt);

        projectile::cool_down(&mut state.player, dt);
        for action in &input.actions {
            match action {
                Action::Reload => {
                    state.player.ammo = config.player.max_ammo;
                    self.events.push(SimEvent::Reloaded {
                        tick,
                        ammo: state.player.ammo,
                    });
                }
                Action::Fire if input.active => {
                    if let Some(shot) = projectile::try_fire_player(&mut state.player, config) {
                        self.events.push(SimEvent::Fired {
                            tick,
                            origin: shot.position,
                            ammo: state.player.ammo,
                        });
                        state.projectiles.push(shot);
                        report.shots_fired += 1;
                    }
                }
                Action::Fire | Action::Restart => {}
            }
        }

        let static_before = state.live_static_targets();
        projectile::integrate(&mut state.projectiles, dt);
        let hits = projectile::resolve_hits(
            &mut state.projectiles,
            &mut state.player,
            &mut state.targets,
            config,
        );
        report.hits = hits.len();
        for hit in hits {
            match hit {
                Hit::Target {
                    target,
                    hostile,
                    outcome: DamageOutcome::Destroyed,
                } => {
                    let score = if hostile {
                        config.enemies.kill_score
                    } else {
                        config.targets.kill_score
                    };
                    state.score += score;
                    report.kills += 1;
                    tracing::debug!(id = %target.short(), hostile, score, "target destroyed");
                    self.events.push(SimEvent::TargetDestroyed {
                        tick,
                        target,
                        hostile,
                        score,
                    });
                }
                Hit::Target {
                    target,
                    outcome: DamageOutcome::Wounded { remaining },
                    ..
                } => {
                    self.events.push(SimEvent::TargetHit {
                        tick,
                        target,
                        remaining,
                    });
                }
                Hit::Target {
                    outcome: DamageOutcome::Ignored,
                    ..
                } => {}
                Hit::Player { damage, remaining } => {
                    tracing::debug!(damage, remaining, "player hit");
                    self.events.push(SimEvent::PlayerDamaged {
                        tick,
                        damage,
                        remaining,
                    });
                    if remaining == 0 && state.status == SessionStatus::Running {
                        state.status = SessionStatus::Defeated;
                        tracing::info!(tick, score = state.score, "player defeated");
                        self.events.push(SimEvent::PlayerDefeated { tick });
                    }
                }
            }
        }

        let enemy_shots =
            behavior::update_hostiles(&mut state.targets, state.player.position, config, dt);
        for shot in enemy_shots {
            if let Owner::Enemy(enemy) = shot.owner {
                self.events.push(SimEvent::EnemyFired { tick, enemy });
            }
            state.projectiles.push(shot);
        }

        report.projectiles_removed = projectile::compact(&mut state.projectiles);
        report.targets_removed = behavior::compact(&mut state.targets).len();
        if static_before > 0 && state.targets_cleared() {
            tracing::info!(tick, score = state.score, "all targets cleared");
            self.events.push(SimEvent::TargetsCleared { tick });
        }

        if let Some(enemy) = behavior::trickle_spawn(&mut state.targets, &mut self.rng, config) {
            let position = state
                .targets
                .last()
                .map(|t| t.position)
                .unwrap_or_default();
            tracing::info!(enemy = %enemy.short(), ?position, "enemy spawned");
            self.events.push(SimEvent::EnemySpawned {
                tick,
                enemy,
                position,
            });
        }

        tracing::trace!(
            dt,
            projectiles = state.projectiles.len(),
            targets = state.targets.len(),
            score = state.score,
            "tick complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSpec;
    use crate::entity::TargetKind;
    use arena_common::LookAngles;
    use arena_input::HeldControls;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    /// Empty arena, player standing at the origin facing +x.
    fn arena() -> GameConfig {
        let mut config = GameConfig::empty_arena();
        config.player.spawn = Vec3::ZERO;
        config
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::new(LookAngles::default())
    }

    fn fire() -> InputSnapshot {
        idle().with_action(Action::Fire)
    }

    fn layout(state: &SimulationState) -> Vec<(Vec3, f32, bool)> {
        state
            .targets
            .iter()
            .map(|t| (t.position, t.size, t.is_hostile()))
            .collect()
    }

    #[test]
    fn dt_is_capped() {
        let mut sim = Simulation::new(arena()).unwrap();
        let cap = sim.config().sim.max_dt;
        assert_eq!(sim.tick(10.0, &idle()).dt, cap);
        assert_eq!(sim.tick(0.01, &idle()).dt, 0.01);
        assert_eq!(sim.tick(-1.0, &idle()).dt, 0.0);
        assert_eq!(sim.tick(f32::NAN, &idle()).dt, 0.0);
        assert_eq!(sim.tick(f32::INFINITY, &idle()).dt, 0.0);
    }

    #[test]
    fn hitch_does_not_launch_player() {
        let mut sim = Simulation::new(arena()).unwrap();
        let jump = idle().with_held(HeldControls {
            jump: true,
            ..Default::default()
        });
        sim.tick(5.0, &jump);
        let config = sim.config();
        let max_rise = config.player.jump_speed * config.sim.max_dt;
        assert!(sim.state().player.position.y <= config.player.standing_height + max_rise);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = arena();
        config.weapon.bullet_speed = 0.0;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn shot_at_target_twenty_units_out() {
        let mut config = arena();
        config.targets.fixed.push(TargetSpec {
            position: Vec3::new(20.0, 1.5, 0.0),
            size: 1.0,
        });
        let mut sim = Simulation::new(config).unwrap();
        let kill_score = sim.config().targets.kill_score;
        let deadline = 20.0 / sim.config().weapon.bullet_speed + DT;

        assert_eq!(sim.tick(DT, &fire()).shots_fired, 1);
        let mut time = DT;
        while sim.state().live_static_targets() > 0 {
            assert!(time <= deadline + 1e-4, "target not hit by {time}s");
            sim.tick(DT, &idle());
            time += DT;
        }
        assert_eq!(sim.score(), kill_score);
        assert!(sim.state().projectiles.is_empty());
        assert!(sim.frame().targets_cleared);
        assert!(sim.events().contains(&SimEvent::TargetsCleared {
            tick: sim.state().tick
        }));
    }

    #[test]
    fn empty_magazine_is_a_silent_no_op() {
        let mut config = arena();
        config.player.max_ammo = 0;
        let mut sim = Simulation::new(config).unwrap();
        let report = sim.tick(DT, &fire());
        assert_eq!(report.shots_fired, 0);
        assert_eq!(sim.state().player.ammo, 0);
        assert!(sim.state().projectiles.is_empty());
        assert!(sim.events().is_empty());
    }

    #[test]
    fn fire_requires_active_input() {
        let mut sim = Simulation::new(arena()).unwrap();
        let mut input = fire();
        input.active = false;
        assert_eq!(sim.tick(DT, &input).shots_fired, 0);
        assert_eq!(sim.state().player.ammo, sim.config().player.max_ammo);
    }

    #[test]
    fn reload_refills_ammo() {
        let mut sim = Simulation::new(arena()).unwrap();
        sim.tick(DT, &fire());
        sim.tick(DT, &fire());
        let max = sim.config().player.max_ammo;
        assert_eq!(sim.state().player.ammo, max - 2);
        sim.tick(DT, &idle().with_action(Action::Reload));
        assert_eq!(sim.state().player.ammo, max);
    }

    #[test]
    fn projectile_removed_on_first_expired_tick() {
        let mut sim = Simulation::new(arena()).unwrap();
        sim.tick(DT, &fire());
        let mut last = sim.state().projectiles[0].lifetime;
        let mut ticks = 1;
        while let Some(p) = sim.state().projectiles.first() {
            assert!(p.lifetime > 0.0);
            assert!(p.lifetime <= last);
            last = p.lifetime;
            sim.tick(DT, &idle());
            ticks += 1;
            assert!(ticks < 1000);
        }
        let expected = (sim.config().weapon.bullet_lifetime / DT).ceil() as i32;
        assert!((ticks - expected).abs() <= 1, "removed after {ticks} ticks");
    }

    #[test]
    fn coincident_shots_score_once() {
        let mut config = arena();
        config.targets.fixed.push(TargetSpec {
            position: Vec3::new(5.0, 1.7, 0.0),
            size: 1.0,
        });
        let mut sim = Simulation::new(config).unwrap();
        let double = fire().with_action(Action::Fire);
        assert_eq!(sim.tick(DT, &double).shots_fired, 2);
        for _ in 0..30 {
            sim.tick(DT, &idle());
        }
        assert_eq!(sim.score(), sim.config().targets.kill_score);
        let destroyed = sim
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::TargetDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn enemy_dies_on_second_hit_and_is_removed_that_tick() {
        let mut config = arena();
        config.enemies.spawn_points.push(Vec3::new(10.0, 1.7, 0.0));
        config.enemies.speed = 0.0;
        config.enemies.engagement_range = 0.0;
        config.enemies.health = 50;
        config.weapon.damage = 25;
        let mut sim = Simulation::new(config).unwrap();
        let enemy = sim.state().targets[0].id;

        for _ in 0..3 {
            sim.tick(DT, &fire());
        }
        let mut wounded_seen = false;
        for _ in 0..30 {
            sim.tick(DT, &idle());
            match sim.state().targets.first() {
                Some(t) => {
                    if t.health() == Some(25) {
                        wounded_seen = true;
                    }
                    assert!(t.is_alive(), "dead enemy survived compaction");
                }
                None => break,
            }
        }
        assert!(wounded_seen);
        assert!(sim.state().targets.is_empty());
        assert_eq!(sim.score(), sim.config().enemies.kill_score);

        let hits: Vec<_> = sim
            .events()
            .iter()
            .filter(|e| {
                matches!(e, SimEvent::TargetHit { target, .. } | SimEvent::TargetDestroyed { target, .. } if *target == enemy)
            })
            .cloned()
            .collect();
        assert_eq!(hits.len(), 2);
        assert!(matches!(hits[0], SimEvent::TargetHit { remaining: 25, .. }));
        assert!(matches!(hits[1], SimEvent::TargetDestroyed { hostile: true, .. }));
        // the third shot flies on through the empty spot
        assert_eq!(sim.state().projectiles.len(), 1);
    }

    #[test]
    fn restart_resets_everything_at_once() {
        let mut config = GameConfig::default();
        config.sim.seed = 99;
        let mut sim = Simulation::new(config).unwrap();
        let initial = layout(sim.state());

        for _ in 0..3 {
            sim.tick(DT, &fire());
        }
        assert_eq!(sim.state().projectiles.len(), 3);
        sim.state.score = 40;
        sim.state.player.health = 12;
        sim.state.targets[0].apply_hit(1000);

        let report = sim.tick(DT, &idle().with_action(Action::Restart));
        assert!(report.restarted);
        let state = sim.state();
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.tick, 0);
        assert_eq!(state.player.health, sim.config().player.max_health);
        assert_eq!(state.player.ammo, sim.config().player.max_ammo);
        assert_eq!(state.player.position, sim.config().player_spawn());
        assert_eq!(layout(state), initial);
        assert!(state.targets.iter().all(Target::is_alive));
        assert_eq!(sim.events().last(), Some(&SimEvent::Restarted));
    }

    #[test]
    fn diagonal_walk_has_configured_speed() {
        let mut sim = Simulation::new(arena()).unwrap();
        let input = idle().with_held(HeldControls {
            forward: true,
            strafe_left: true,
            ..Default::default()
        });
        sim.tick(DT, &input);
        let v = sim.state().player.velocity;
        let flat = Vec3::new(v.x, 0.0, v.z).length();
        assert!((flat - sim.config().player.move_speed).abs() < 1e-4);
    }

    #[test]
    fn player_never_sinks_below_standing_height() {
        let mut sim = Simulation::new(arena()).unwrap();
        let standing = sim.config().player.standing_height;
        for i in 0..600 {
            let input = idle().with_held(HeldControls {
                jump: i % 37 == 0,
                forward: true,
                ..Default::default()
            });
            let was_grounded = sim.state().player.grounded;
            sim.tick(DT * 1.7, &input);
            let p = &sim.state().player;
            assert!(p.position.y >= standing);
            if input.held.jump && was_grounded {
                assert!(!p.grounded);
            }
        }
    }

    #[test]
    fn defeat_freezes_state_until_restart() {
        let mut sim = Simulation::new(arena()).unwrap();
        let shooter = arena_common::EntityId::new();
        let eye = sim.state().player.position;
        sim.state.player.health = 5;
        sim.state.projectiles.push(Projectile::new(
            eye,
            Vec3::X,
            1.0,
            1.0,
            Owner::Enemy(shooter),
            10,
        ));
        sim.state.projectiles.push(Projectile::new(
            eye + Vec3::new(0.0, 0.0, 30.0),
            Vec3::Z,
            1.0,
            1.0,
            Owner::Enemy(shooter),
            10,
        ));
        sim.tick(DT, &idle());
        assert_eq!(sim.status(), SessionStatus::Defeated);
        assert_eq!(sim.state().player.health, 0);
        assert!(sim.events().contains(&SimEvent::PlayerDefeated { tick: 1 }));

        let frozen = sim.state().clone();
        sim.tick(DT, &fire());
        assert_eq!(sim.state(), &frozen);
        assert_eq!(sim.frame().projectiles.len(), 1);

        sim.tick(DT, &idle().with_action(Action::Restart));
        assert_eq!(sim.status(), SessionStatus::Running);
    }

    #[test]
    fn hostile_shoots_the_player() {
        let mut config = arena();
        config.enemies.spawn_points.push(Vec3::new(8.0, 1.7, 0.0));
        config.enemies.fire_interval = 0.1;
        let mut sim = Simulation::new(config).unwrap();
        for _ in 0..60 {
            sim.tick(DT, &idle());
        }
        assert!(sim.state().player.health < sim.config().player.max_health);
        assert!(sim
            .events()
            .iter()
            .any(|e| matches!(e, SimEvent::EnemyFired { .. })));
    }

    #[test]
    fn empty_enemy_pool_refills() {
        let mut config = arena();
        config.enemies.respawn_chance = 1.0;
        let mut sim = Simulation::new(config).unwrap();
        sim.tick(DT, &idle());
        assert_eq!(sim.frame().hostile_count(), 1);
        assert!(matches!(
            sim.events().last(),
            Some(SimEvent::EnemySpawned { tick: 1, .. })
        ));
        sim.tick(DT, &idle());
        assert_eq!(sim.frame().hostile_count(), 1);
    }

    #[test]
    fn same_seed_same_session() {
        let mut config = GameConfig::default();
        config.enemies.respawn_chance = 0.2;
        let mut a = Simulation::new(config.clone()).unwrap();
        let mut b = Simulation::new(config).unwrap();
        let input = idle()
            .with_held(HeldControls {
                forward: true,
                ..Default::default()
            })
            .with_action(Action::Fire);
        for _ in 0..300 {
            a.tick(DT, &input);
            b.tick(DT, &input);
        }
        assert_eq!(layout(a.state()), layout(b.state()));
        assert_eq!(a.state().player, b.state().player);
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn frame_reflects_hud_and_live_entities() {
        let mut config = arena();
        config.targets.fixed.push(TargetSpec {
            position: Vec3::new(0.0, 1.5, 30.0),
            size: 1.0,
        });
        config.enemies.spawn_points.push(Vec3::new(-30.0, 1.5, 0.0));
        let mut sim = Simulation::new(config).unwrap();
        sim.tick(DT, &fire());
        let frame = sim.frame();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.targets.len(), 2);
        assert_eq!(frame.hostile_count(), 1);
        assert_eq!(frame.projectiles.len(), 1);
        assert_eq!(frame.hud.ammo, sim.config().player.max_ammo - 1);
        assert_eq!(frame.hud.health, sim.config().player.max_health);
        assert_eq!(frame.status, SessionStatus::Running);
        assert!(!frame.targets_cleared);
        let hostile = frame.targets.iter().find(|t| t.hostile).unwrap();
        assert_eq!(hostile.health, Some(sim.config().enemies.health));
        assert!(hostile.facing.is_some());
        assert!(matches!(sim.state().targets[1].kind, TargetKind::Hostile(_)));
    }
}
