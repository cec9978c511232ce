#[cfg(test)]
mod tests {
    use glam::Vec3;

    use picket_core::constants::*;
    use picket_core::enums::EnemyState;
    use picket_core::types::AgentId;

    use crate::alert::*;
    use crate::fsm::{evaluate, EnemyContext};

    /// Observer that remembers whether it was alerted; can be set to reject.
    struct Recorder {
        id: AgentId,
        alerted: bool,
        reject: bool,
    }

    impl Recorder {
        fn new(id: u32) -> Self {
            Self {
                id: AgentId(id),
                alerted: false,
                reject: false,
            }
        }
    }

    /// Directory that records delivery order across all observers.
    struct LoggingDirectory {
        observers: Vec<Recorder>,
        log: Vec<AgentId>,
    }

    impl LoggingDirectory {
        fn new(count: u32) -> Self {
            Self {
                observers: (0..count).map(Recorder::new).collect(),
                log: Vec::new(),
            }
        }
    }

    impl AlertObserver for Recorder {
        fn on_alert(&mut self, _alert: &Alert) -> Result<(), AlertError> {
            if self.reject {
                return Err(AlertError::Inactive(self.id));
            }
            self.alerted = true;
            Ok(())
        }
    }

    impl ObserverDirectory for LoggingDirectory {
        fn observer_mut(&mut self, id: AgentId) -> Option<&mut dyn AlertObserver> {
            let observer = self.observers.get_mut(id.index())?;
            self.log.push(id);
            Some(observer as &mut dyn AlertObserver)
        }
    }

    fn alert_from(source: u32) -> Alert {
        Alert {
            source: AgentId(source),
            tick: 0,
        }
    }

    // ---- Subject ----

    #[test]
    fn test_notify_in_attachment_order_once_each() {
        let mut subject = Subject::new();
        for id in [3, 0, 2] {
            subject.attach(AgentId(id));
        }
        let mut directory = LoggingDirectory::new(4);

        let report = subject.notify(&mut directory, &alert_from(1));

        assert_eq!(directory.log, vec![AgentId(3), AgentId(0), AgentId(2)]);
        assert_eq!(report.delivered, vec![AgentId(3), AgentId(0), AgentId(2)]);
        assert!(report.rejected.is_empty());
        assert!(!directory.observers[1].alerted, "unregistered agent untouched");
    }

    #[test]
    fn test_duplicate_attach_double_delivers() {
        let mut subject = Subject::new();
        subject.attach(AgentId(0));
        subject.attach(AgentId(1));
        subject.attach(AgentId(0));
        let mut directory = LoggingDirectory::new(2);

        let report = subject.notify(&mut directory, &alert_from(1));

        assert_eq!(subject.len(), 3);
        assert_eq!(directory.log, vec![AgentId(0), AgentId(1), AgentId(0)]);
        assert_eq!(report.delivered.len(), 3);
    }

    #[test]
    fn test_attach_unique_dedups() {
        let mut subject = Subject::new();
        assert!(subject.attach_unique(AgentId(4)));
        assert!(!subject.attach_unique(AgentId(4)));
        assert_eq!(subject.observers(), &[AgentId(4)]);
    }

    #[test]
    fn test_mesh_each_subject_reaches_only_its_registry() {
        // Every agent attached to every other agent's registry.
        let m = 4u32;
        let subjects: Vec<Subject> = (0..m)
            .map(|owner| {
                let mut subject = Subject::new();
                for peer in (0..m).filter(|&p| p != owner) {
                    subject.attach(AgentId(peer));
                }
                subject
            })
            .collect();

        for (owner, subject) in subjects.iter().enumerate() {
            let mut directory = LoggingDirectory::new(m);
            subject.notify(&mut directory, &alert_from(owner as u32));
            let expected: Vec<AgentId> = (0..m)
                .filter(|&p| p as usize != owner)
                .map(AgentId)
                .collect();
            assert_eq!(directory.log, expected);
            assert!(!directory.observers[owner].alerted);
        }
    }

    #[test]
    fn test_notify_isolates_failures() {
        let mut subject = Subject::new();
        for id in [0, 1, 9, 2] {
            subject.attach(AgentId(id));
        }
        let mut directory = LoggingDirectory::new(3);
        directory.observers[1].reject = true;

        let report = subject.notify(&mut directory, &alert_from(0));

        assert_eq!(report.delivered, vec![AgentId(0), AgentId(2)]);
        assert_eq!(
            report.rejected,
            vec![
                (AgentId(1), AlertError::Inactive(AgentId(1))),
                (AgentId(9), AlertError::UnknownObserver(AgentId(9))),
            ]
        );
        assert!(directory.observers[2].alerted, "later observers still run");
    }

    #[test]
    fn test_slice_directory_resolves_by_index() {
        let mut observers = vec![Recorder::new(0), Recorder::new(1)];
        let mut subject = Subject::new();
        subject.attach(AgentId(1));
        subject.attach(AgentId(5));

        let report = subject.notify(observers.as_mut_slice(), &alert_from(0));

        assert!(observers[1].alerted);
        assert!(!observers[0].alerted);
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn test_bus_subscribes_once_and_includes_publisher() {
        let mut bus = AlertBus::new();
        for id in 0..3 {
            assert!(bus.subscribe(AgentId(id)));
        }
        assert!(!bus.subscribe(AgentId(1)));

        let mut observers: Vec<Recorder> = (0..3).map(Recorder::new).collect();
        let report = bus.publish(observers.as_mut_slice(), &alert_from(2));

        assert_eq!(report.delivered, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert!(observers.iter().all(|o| o.alerted));
    }

    // ---- FSM ----

    fn patrol_context() -> EnemyContext {
        EnemyContext {
            state: EnemyState::Patrol,
            position: Vec3::ZERO,
            player_position: Vec3::new(0.0, 0.0, 50.0),
            patrol_target: Some(Vec3::new(10.0, 0.0, 0.0)),
            aggro_distance: DEFAULT_AGGRO_DISTANCE,
            alerted: false,
            shooting: false,
            speed: DEFAULT_ENEMY_SPEED,
            dt: 0.1,
            now_secs: 0.0,
            next_fire_secs: 0.0,
            fire_rate: DEFAULT_FIRE_RATE,
        }
    }

    #[test]
    fn test_unalerted_patrols_toward_waypoint() {
        let ctx = patrol_context();
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Patrol);
        assert!(!update.state_changed);
        assert!((update.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(update.facing, Some(Vec3::new(10.0, 0.0, 0.0)));
        assert!(!update.looking);
        assert!(!update.fire);
    }

    #[test]
    fn test_unalerted_looks_at_nearby_player_but_keeps_patrolling() {
        let ctx = EnemyContext {
            player_position: Vec3::new(0.0, 0.0, 5.0),
            ..patrol_context()
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Patrol);
        assert!(update.looking);
        assert_eq!(update.facing, Some(ctx.player_position));
        assert_eq!(update.aggro_distance, DEFAULT_AGGRO_DISTANCE, "no escalation");
        assert!(!update.shooting);
        assert!(update.position.x > 0.0, "still walks the patrol");
    }

    #[test]
    fn test_aggro_boundary_is_inclusive() {
        let ctx = EnemyContext {
            player_position: Vec3::new(0.0, 0.0, DEFAULT_AGGRO_DISTANCE),
            alerted: true,
            state: EnemyState::Chase,
            ..patrol_context()
        };
        assert_eq!(evaluate(&ctx).new_state, EnemyState::Attack);
    }

    #[test]
    fn test_alerted_far_player_chases_and_escalates() {
        let ctx = EnemyContext {
            alerted: true,
            state: EnemyState::Chase,
            ..patrol_context()
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Chase);
        assert_eq!(update.aggro_distance, ESCALATED_AGGRO_DISTANCE);
        assert!(update.shooting);
        assert!(update.looking);
        assert!((update.position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert!(!update.fire, "chasing does not fire");
    }

    #[test]
    fn test_alerted_near_player_attacks_and_fires() {
        let ctx = EnemyContext {
            alerted: true,
            state: EnemyState::Chase,
            player_position: Vec3::new(0.0, 0.0, 8.0),
            now_secs: 4.0,
            next_fire_secs: 3.5,
            ..patrol_context()
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Attack);
        assert!(update.state_changed);
        assert_eq!(update.position, ctx.position, "attacking holds position");
        assert!(update.fire);
        assert!((update.next_fire_secs - (4.0 + f64::from(DEFAULT_FIRE_RATE))).abs() < 1e-9);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let ctx = EnemyContext {
            alerted: true,
            shooting: true,
            state: EnemyState::Attack,
            player_position: Vec3::new(0.0, 0.0, 8.0),
            aggro_distance: ESCALATED_AGGRO_DISTANCE,
            now_secs: 1.0,
            next_fire_secs: 3.0,
            ..patrol_context()
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Attack);
        assert!(!update.fire);
        assert_eq!(update.next_fire_secs, 3.0);
    }

    #[test]
    fn test_chase_uses_pre_escalation_distance_this_tick() {
        // 15 units away with aggro 10: Chase this tick, even though aggro
        // becomes 20 as part of the same evaluation.
        let ctx = EnemyContext {
            alerted: true,
            player_position: Vec3::new(0.0, 0.0, 15.0),
            ..patrol_context()
        };
        let first = evaluate(&ctx);
        assert_eq!(first.new_state, EnemyState::Chase);
        assert_eq!(first.aggro_distance, ESCALATED_AGGRO_DISTANCE);

        let second = evaluate(&EnemyContext {
            state: first.new_state,
            position: first.position,
            aggro_distance: first.aggro_distance,
            shooting: first.shooting,
            ..ctx
        });
        assert_eq!(second.new_state, EnemyState::Attack);
    }

    #[test]
    fn test_escalation_is_assignment_not_accumulation() {
        let mut ctx = EnemyContext {
            alerted: true,
            player_position: Vec3::new(0.0, 0.0, 100.0),
            ..patrol_context()
        };
        for _ in 0..10 {
            let update = evaluate(&ctx);
            assert_eq!(update.aggro_distance, ESCALATED_AGGRO_DISTANCE);
            ctx.aggro_distance = update.aggro_distance;
            ctx.state = update.new_state;
            ctx.position = update.position;
            ctx.shooting = update.shooting;
        }
    }

    #[test]
    fn test_alerted_never_returns_to_patrol() {
        for distance in [0.0, 1.0, 9.9, 10.0, 19.9, 20.0, 20.1, 500.0] {
            for aggro in [0.5, DEFAULT_AGGRO_DISTANCE, ESCALATED_AGGRO_DISTANCE, 1000.0] {
                let ctx = EnemyContext {
                    alerted: true,
                    state: EnemyState::Patrol,
                    aggro_distance: aggro,
                    player_position: Vec3::new(distance, 0.0, 0.0),
                    ..patrol_context()
                };
                let update = evaluate(&ctx);
                assert_ne!(
                    update.new_state,
                    EnemyState::Patrol,
                    "alerted enemy patrolled at distance {distance}, aggro {aggro}"
                );
            }
        }
    }

    #[test]
    fn test_no_patrol_target_stays_put() {
        let ctx = EnemyContext {
            patrol_target: None,
            ..patrol_context()
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_state, EnemyState::Patrol);
        assert_eq!(update.position, ctx.position);
        assert_eq!(update.facing, None);
    }
}
