//! The game reducer: `(state, action) -> state`.
//!
//! The reducer is pure. It never mutates the state it is given and never
//! panics on bad input; anything it cannot apply comes back as a
//! `Rejection`, meaning "the input state stands".
//!
//! ## Move
//!
//! 1. Refuse once the game is over
//! 2. Refuse unseated players and players out of turn
//! 3. Refuse moves the phase forbids or beyond the turn's move limit
//! 4. Let the game apply the move (`None` refuses it)
//! 5. Record the action, then check end of game, end of phase, end of turn
//!
//! ## Events
//!
//! - `endTurn`: next seat from the active turn order (or `args[0]`)
//! - `endPhase`: next phase (or `args[0]`), first seat of its turn order

use im::Vector;
use tracing::{debug, info, instrument};

use crate::core::{
    Action, ActionRecord, ConfigError, Context, Event, GameConfig, MoveKind, PhaseId, PlayerId,
    RawAction, Rejection, State,
};
use crate::rules::{Game, MoveValidator, Seat};

/// State type produced by the reducer of game `Gm`.
pub type GameState<Gm> = State<<Gm as Game>::Data, <Gm as Game>::Move>;

/// Pure state-transition function for one game and configuration.
pub struct Reducer<Gm: Game> {
    game: Gm,
    config: GameConfig<Gm::Data, Gm::Move>,
}

impl<Gm: Game> std::fmt::Debug for Reducer<Gm> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reducer")
            .field("game", &self.game.name())
            .field("num_players", &self.config.num_players)
            .field("phases", &self.config.phases.len())
            .finish()
    }
}

impl<Gm: Game> Reducer<Gm> {
    /// Create a reducer, validating the configuration.
    #[instrument(skip_all, fields(game = game.name()))]
    pub fn new(game: Gm, config: GameConfig<Gm::Data, Gm::Move>) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(num_players = config.num_players, "reducer ready");
        Ok(Self { game, config })
    }

    /// Get the game definition.
    #[must_use]
    pub fn game(&self) -> &Gm {
        &self.game
    }

    /// Get the game configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig<Gm::Data, Gm::Move> {
        &self.config
    }

    /// Number of seated players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.config.num_players
    }

    /// Move validator over this reducer's configuration.
    #[must_use]
    pub fn validator(&self) -> MoveValidator<'_, Gm::Data, Gm::Move> {
        MoveValidator::new(&self.config)
    }

    /// Check whether a move may be attempted in the given context.
    #[must_use]
    pub fn is_move_legal(&self, ctx: &Context, kind: Gm::Move) -> bool {
        self.validator().is_move_legal(ctx, kind)
    }

    /// Build the initial state by running the game's setup.
    #[instrument(skip_all, fields(game = self.game.name()))]
    pub fn initial_state(&self) -> GameState<Gm> {
        let num_players = self.config.num_players;
        let mut ctx = Context::new(num_players, self.config.starting_phase);
        let g = self.game.setup(&ctx);

        let order = self.config.turn_order_for(ctx.phase);
        let seat = order.first(&g, &ctx);
        ctx.play_order = order.play_order(&g, num_players);
        seat_player(&mut ctx, seat);

        State::new(g, ctx)
    }

    /// Apply an action.
    ///
    /// Returns the next state, or the reason the input state is unchanged.
    #[instrument(level = "debug", skip_all, fields(state_id = state.state_id, action = ?action))]
    pub fn reduce(
        &self,
        state: &GameState<Gm>,
        action: &Action<Gm::Move>,
    ) -> Result<GameState<Gm>, Rejection> {
        let result = match action {
            Action::MakeMove { kind, args, player } => {
                self.apply_move(state, action, *kind, args, *player)
            }
            Action::GameEvent { event, args } => self.apply_event(state, action, *event, args),
        };

        match &result {
            Ok(next) => debug!(
                state_id = next.state_id,
                turn = next.ctx.turn,
                current = next.ctx.current_player.0,
                "action applied"
            ),
            Err(reason) => debug!(%reason, "action rejected"),
        }
        result
    }

    /// Apply an action, keeping the input state on rejection.
    #[must_use]
    pub fn reduce_or_keep(
        &self,
        state: &GameState<Gm>,
        action: &Action<Gm::Move>,
    ) -> GameState<Gm> {
        self.reduce(state, action).unwrap_or_else(|_| state.clone())
    }

    /// Resolve a wire action by name, then apply it.
    pub fn reduce_raw(
        &self,
        state: &GameState<Gm>,
        raw: &RawAction,
    ) -> Result<GameState<Gm>, Rejection> {
        let action = raw
            .resolve::<Gm::Move>(state.ctx.num_players)
            .inspect_err(|reason| debug!(%reason, "malformed action ignored"))?;
        self.reduce(state, &action)
    }

    /// Replay actions from the initial state, skipping rejected ones.
    pub fn replay<'a>(
        &self,
        actions: impl IntoIterator<Item = &'a Action<Gm::Move>>,
    ) -> GameState<Gm> {
        actions
            .into_iter()
            .fold(self.initial_state(), |state, action| self.reduce_or_keep(&state, action))
    }

    /// The state as seen by `player` (`None` for a spectator).
    #[must_use]
    pub fn player_view(&self, state: &GameState<Gm>, player: Option<PlayerId>) -> GameState<Gm> {
        State {
            g: self.game.player_view(&state.g, &state.ctx, player),
            ctx: state.ctx.clone(),
            log: state.log.clone(),
            state_id: state.state_id,
        }
    }

    fn apply_move(
        &self,
        state: &GameState<Gm>,
        action: &Action<Gm::Move>,
        kind: Gm::Move,
        args: &[i64],
        player: Option<PlayerId>,
    ) -> Result<GameState<Gm>, Rejection> {
        let ctx = &state.ctx;
        if ctx.is_over() {
            return Err(Rejection::GameOver);
        }
        if let Some(player) = player {
            if !ctx.is_player(player) {
                return Err(Rejection::InvalidPlayer(player.wire()));
            }
            if player != ctx.current_player {
                return Err(Rejection::NotYourTurn {
                    player,
                    current: ctx.current_player,
                });
            }
        }
        self.validator().check(ctx, kind)?;

        let g = self
            .game
            .apply_move(kind, &state.g, ctx, args)
            .ok_or(Rejection::IllegalMove(kind.name()))?;

        let mut next = state.clone();
        next.g = g;
        next.ctx.num_moves += 1;
        record(&mut next, state, action);

        if self.check_game_over(&mut next) {
            return Ok(next);
        }

        if !self.config.phases.is_empty() && self.game.end_phase_if(&next.g, &next.ctx) {
            let phase = self.config.phase_after(next.ctx.phase);
            debug!(from = %next.ctx.phase, to = %phase, "phase ended by condition");
            self.begin_phase(&mut next, phase);
            self.check_game_over(&mut next);
        } else if self.game.end_turn_if(&next.g, &next.ctx) {
            debug!(turn = next.ctx.turn, "turn ended by condition");
            self.end_turn(&mut next, None);
            self.check_game_over(&mut next);
        }

        Ok(next)
    }

    fn apply_event(
        &self,
        state: &GameState<Gm>,
        action: &Action<Gm::Move>,
        event: Event,
        args: &[i64],
    ) -> Result<GameState<Gm>, Rejection> {
        if state.ctx.is_over() {
            return Err(Rejection::GameOver);
        }
        if !self.config.events.is_enabled(event) {
            return Err(Rejection::EventDisabled(event));
        }

        let mut next = match event {
            Event::EndTurn => {
                let explicit = match args.first() {
                    Some(&raw) => Some(self.explicit_seat(state, raw)?),
                    None => None,
                };
                let mut next = state.clone();
                self.end_turn(&mut next, explicit);
                next
            }
            Event::EndPhase => {
                if self.config.phases.is_empty() {
                    return Err(Rejection::EventDisabled(event));
                }
                let phase = match args.first() {
                    Some(&raw) => self.explicit_phase(raw)?,
                    None => self.config.phase_after(state.ctx.phase),
                };
                let mut next = state.clone();
                self.begin_phase(&mut next, phase);
                next
            }
        };

        record(&mut next, state, action);
        self.check_game_over(&mut next);
        Ok(next)
    }

    /// Pass the turn to `explicit` or the turn order's next seat.
    fn end_turn(&self, next: &mut GameState<Gm>, explicit: Option<Seat>) {
        let num_players = self.config.num_players;
        let order = self.config.turn_order_for(next.ctx.phase);
        let seat = explicit.unwrap_or_else(|| order.next(&next.g, &next.ctx));

        next.ctx.play_order = order.play_order(&next.g, num_players);
        seat_player(&mut next.ctx, seat);
        next.ctx.turn += 1;
        next.ctx.num_moves = 0;
    }

    /// Enter `phase` and start a fresh turn with its first seat.
    fn begin_phase(&self, next: &mut GameState<Gm>, phase: PhaseId) {
        let num_players = self.config.num_players;
        next.ctx.phase = phase;

        let order = self.config.turn_order_for(phase);
        let seat = order.first(&next.g, &next.ctx);
        next.ctx.play_order = order.play_order(&next.g, num_players);
        seat_player(&mut next.ctx, seat);
        next.ctx.turn += 1;
        next.ctx.num_moves = 0;
    }

    /// Seat named by an `endTurn` argument.
    fn explicit_seat(&self, state: &GameState<Gm>, raw: i64) -> Result<Seat, Rejection> {
        let num_players = self.config.num_players;
        let player = usize::try_from(raw)
            .ok()
            .and_then(|index| PlayerId::from_index(index, num_players))
            .ok_or_else(|| Rejection::InvalidPlayer(raw.to_string()))?;

        let order: Vector<PlayerId> = self
            .config
            .turn_order_for(state.ctx.phase)
            .play_order(&state.g, num_players);
        order
            .index_of(&player)
            .map(|position| Seat { position, player })
            .ok_or_else(|| Rejection::InvalidPlayer(raw.to_string()))
    }

    /// Phase named by an `endPhase` argument.
    fn explicit_phase(&self, raw: i64) -> Result<PhaseId, Rejection> {
        u32::try_from(raw)
            .ok()
            .map(PhaseId::new)
            .filter(|phase| self.config.get_phase(*phase).is_some())
            .ok_or(Rejection::UnknownPhase(raw))
    }

    /// Evaluate the game's end condition. Returns true if the game ended.
    fn check_game_over(&self, next: &mut GameState<Gm>) -> bool {
        match self.game.end_game_if(&next.g, &next.ctx) {
            Some(result) => {
                info!(game = self.game.name(), ?result, turn = next.ctx.turn, "game over");
                next.ctx.gameover = Some(result);
                true
            }
            None => false,
        }
    }
}

fn seat_player(ctx: &mut Context, seat: Seat) {
    ctx.current_player = seat.player;
    ctx.play_order_pos = seat.position;
}

fn record<G, M: MoveKind>(next: &mut State<G, M>, prev: &State<G, M>, action: &Action<M>) {
    next.state_id = prev.state_id + 1;
    next.log.push_back(ActionRecord::new(
        prev.ctx.current_player,
        action.clone(),
        prev.ctx.turn,
        next.state_id,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{game_event, make_move, EventsConfig, GameOver, PhaseConfig};
    use crate::rules::TurnOrder;

    /// Counter game: players add to a shared total; reaching the target wins.
    struct Counter {
        target: i64,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum CounterMove {
        Add,
        Reset,
    }

    impl MoveKind for CounterMove {
        const ALL: &'static [Self] = &[CounterMove::Add, CounterMove::Reset];

        fn name(self) -> &'static str {
            match self {
                CounterMove::Add => "add",
                CounterMove::Reset => "reset",
            }
        }
    }

    impl Game for Counter {
        type Data = i64;
        type Move = CounterMove;

        fn name(&self) -> &str {
            "counter"
        }

        fn setup(&self, _ctx: &Context) -> i64 {
            0
        }

        fn apply_move(
            &self,
            kind: CounterMove,
            g: &i64,
            _ctx: &Context,
            args: &[i64],
        ) -> Option<i64> {
            match kind {
                CounterMove::Add => {
                    let amount = *args.first()?;
                    (amount > 0).then_some(g + amount)
                }
                CounterMove::Reset => Some(0),
            }
        }

        fn end_game_if(&self, g: &i64, ctx: &Context) -> Option<GameOver> {
            (*g >= self.target).then_some(GameOver::Winner(ctx.current_player))
        }

        fn end_turn_if(&self, g: &i64, _ctx: &Context) -> bool {
            *g == 7
        }
    }

    fn reducer(config: GameConfig<i64, CounterMove>) -> Reducer<Counter> {
        Reducer::new(Counter { target: 10 }, config).unwrap()
    }

    fn add(amount: i64) -> Action<CounterMove> {
        make_move(CounterMove::Add, &[amount], None)
    }

    fn end_turn() -> Action<CounterMove> {
        game_event(Event::EndTurn, &[])
    }

    #[test]
    fn test_initial_state() {
        let r = reducer(GameConfig::new(3));
        let state = r.initial_state();

        assert_eq!(state.g, 0);
        assert_eq!(state.ctx.turn, 1);
        assert_eq!(state.ctx.current_player, PlayerId::new(0));
        assert_eq!(state.state_id, 0);
    }

    #[test]
    fn test_move_applies_and_logs() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let next = r.reduce(&state, &add(3)).unwrap();
        assert_eq!(next.g, 3);
        assert_eq!(next.ctx.num_moves, 1);
        assert_eq!(next.state_id, 1);
        assert_eq!(next.log.len(), 1);
        assert_eq!(next.log[0].player, PlayerId::new(0));
        assert_eq!(next.log[0].sequence, 1);

        // Input untouched
        assert_eq!(state.g, 0);
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_handler_refusal_is_illegal_move() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        assert_eq!(r.reduce(&state, &add(-1)), Err(Rejection::IllegalMove("add")));
        assert_eq!(
            r.reduce(&state, &make_move(CounterMove::Add, &[], None)),
            Err(Rejection::IllegalMove("add"))
        );
    }

    #[test]
    fn test_unchanged_data_still_counts_as_move() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let next = r.reduce(&state, &make_move(CounterMove::Reset, &[], None)).unwrap();
        assert_eq!(next.g, state.g);
        assert_eq!(next.ctx.num_moves, 1);
        assert_eq!(next.state_id, 1);
    }

    #[test]
    fn test_wrong_and_unseated_players() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let out_of_turn = make_move(CounterMove::Add, &[1], Some(PlayerId::new(1)));
        assert_eq!(
            r.reduce(&state, &out_of_turn),
            Err(Rejection::NotYourTurn {
                player: PlayerId::new(1),
                current: PlayerId::new(0),
            })
        );

        let unseated = make_move(CounterMove::Add, &[1], Some(PlayerId::new(4)));
        assert_eq!(r.reduce(&state, &unseated), Err(Rejection::InvalidPlayer("4".to_string())));
    }

    #[test]
    fn test_end_turn_rotates() {
        let r = reducer(GameConfig::new(3));
        let state = r.initial_state();

        let next = r.reduce(&state, &end_turn()).unwrap();
        assert_eq!(next.ctx.current_player, PlayerId::new(1));
        assert_eq!(next.ctx.turn, 2);
        assert_eq!(next.ctx.num_moves, 0);
        assert_eq!(next.log[0].action, end_turn());
    }

    #[test]
    fn test_end_turn_resets_move_count() {
        let r = reducer(GameConfig::new(2).with_moves_per_turn(1));
        let state = r.initial_state();

        let moved = r.reduce(&state, &add(1)).unwrap();
        assert_eq!(r.reduce(&moved, &add(1)), Err(Rejection::MoveLimitReached(1)));

        let passed = r.reduce(&moved, &end_turn()).unwrap();
        let moved_again = r.reduce(&passed, &add(1)).unwrap();
        assert_eq!(moved_again.g, 2);
    }

    #[test]
    fn test_end_turn_explicit_next() {
        let r = reducer(GameConfig::new(4));
        let state = r.initial_state();

        let next = r.reduce(&state, &game_event(Event::EndTurn, &[3])).unwrap();
        assert_eq!(next.ctx.current_player, PlayerId::new(3));
        assert_eq!(next.ctx.play_order_pos, 3);

        assert_eq!(
            r.reduce(&state, &game_event(Event::EndTurn, &[9])),
            Err(Rejection::InvalidPlayer("9".to_string()))
        );
        assert_eq!(
            r.reduce(&state, &game_event(Event::EndTurn, &[-1])),
            Err(Rejection::InvalidPlayer("-1".to_string()))
        );
    }

    #[test]
    fn test_end_turn_explicit_next_must_be_in_order() {
        let order = TurnOrder::custom([PlayerId::new(2), PlayerId::new(0)]);
        let r = reducer(GameConfig::new(4).with_turn_order(order));
        let state = r.initial_state();

        assert!(r.reduce(&state, &game_event(Event::EndTurn, &[0])).is_ok());
        assert_eq!(
            r.reduce(&state, &game_event(Event::EndTurn, &[1])),
            Err(Rejection::InvalidPlayer("1".to_string()))
        );
    }

    #[test]
    fn test_end_turn_if_condition() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let next = r.reduce(&state, &add(7)).unwrap();
        assert_eq!(next.ctx.current_player, PlayerId::new(1));
        assert_eq!(next.ctx.turn, 2);
    }

    #[test]
    fn test_game_over_locks_state() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let won = r.reduce(&state, &add(10)).unwrap();
        assert_eq!(won.ctx.gameover, Some(GameOver::Winner(PlayerId::new(0))));

        assert_eq!(r.reduce(&won, &add(1)), Err(Rejection::GameOver));
        assert_eq!(r.reduce(&won, &end_turn()), Err(Rejection::GameOver));
        assert_eq!(r.reduce_or_keep(&won, &add(1)), won);
    }

    #[test]
    fn test_disabled_events() {
        let events = EventsConfig {
            end_turn: false,
            end_phase: true,
        };
        let r = reducer(GameConfig::new(2).with_events(events));
        let state = r.initial_state();

        assert_eq!(
            r.reduce(&state, &end_turn()),
            Err(Rejection::EventDisabled(Event::EndTurn))
        );
        // No phases configured
        assert_eq!(
            r.reduce(&state, &game_event(Event::EndPhase, &[])),
            Err(Rejection::EventDisabled(Event::EndPhase))
        );
    }

    #[test]
    fn test_end_phase() {
        let config = GameConfig::new(3)
            .with_phase(
                PhaseConfig::new(PhaseId::new(0), "build").with_allowed_moves(&[CounterMove::Add]),
            )
            .with_phase(
                PhaseConfig::new(PhaseId::new(1), "tidy")
                    .with_allowed_moves(&[CounterMove::Reset])
                    .with_turn_order(TurnOrder::custom([PlayerId::new(2), PlayerId::new(1)])),
            );
        let r = reducer(config);
        let state = r.initial_state();

        let reset = make_move(CounterMove::Reset, &[], None);
        assert!(matches!(
            r.reduce(&state, &reset),
            Err(Rejection::MoveNotAllowed { kind: "reset", .. })
        ));

        let tidy = r.reduce(&state, &game_event(Event::EndPhase, &[])).unwrap();
        assert_eq!(tidy.ctx.phase, PhaseId::new(1));
        assert_eq!(tidy.ctx.current_player, PlayerId::new(2));
        assert_eq!(tidy.ctx.turn, 2);
        assert!(r.reduce(&tidy, &reset).is_ok());

        let back = r.reduce(&tidy, &game_event(Event::EndPhase, &[0])).unwrap();
        assert_eq!(back.ctx.phase, PhaseId::new(0));
        assert_eq!(back.ctx.current_player, PlayerId::new(0));

        assert_eq!(
            r.reduce(&tidy, &game_event(Event::EndPhase, &[5])),
            Err(Rejection::UnknownPhase(5))
        );
    }

    #[test]
    fn test_reduce_raw() {
        let r = reducer(GameConfig::new(2));
        let state = r.initial_state();

        let raw: RawAction = serde_json::from_str(
            r#"{"type":"MAKE_MOVE","move":"add","args":[4],"playerID":"0"}"#,
        )
        .unwrap();
        assert_eq!(r.reduce_raw(&state, &raw).unwrap().g, 4);

        let unknown: RawAction = serde_json::from_str(
            r#"{"type":"MAKE_MOVE","move":"double"}"#,
        )
        .unwrap();
        assert_eq!(
            r.reduce_raw(&state, &unknown),
            Err(Rejection::UnknownMove("double".to_string()))
        );
    }

    #[test]
    fn test_replay_skips_rejections() {
        let r = reducer(GameConfig::new(2));
        let actions = vec![add(2), add(-5), end_turn(), add(3)];

        let state = r.replay(&actions);
        assert_eq!(state.g, 5);
        assert_eq!(state.state_id, 3);
        assert_eq!(state.ctx.current_player, PlayerId::new(1));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let result = Reducer::new(Counter { target: 1 }, GameConfig::new(0));
        assert!(result.is_err());
    }
}
