pub mod assign;
pub mod catalog;
pub mod errors;
pub mod events;
pub mod player;
pub mod reroll;
pub mod reveal;
pub mod rng;
pub mod session;
pub mod spin;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::assign::Assignment;
    use crate::catalog::Weapon;
    use crate::player::Player;
    use crate::session::Session;

    /// Create `n` roster players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(i as u64 + 1, format!("玩家{}", i + 1)))
            .collect()
    }

    /// Create `n` synthetic weapons with distinct names.
    pub fn make_weapons(n: usize) -> Vec<Weapon> {
        (0..n)
            .map(|i| {
                Weapon::new(
                    &format!("武器{i}"),
                    "#888888",
                    &format!("测试武器{i}"),
                    &format!("武器{i}.png"),
                )
            })
            .collect()
    }

    /// Create `n` synthetic challenge strings.
    pub fn make_challenges(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("挑战{i}")).collect()
    }

    /// Deterministically assign catalog weapons to the roster in order
    /// (player i gets catalog weapon i), leaving the session idle and every
    /// player revealed — the state an assignment run rests in.
    pub fn assign_weapons_in_order(session: &mut Session) {
        session.begin_assignment();
        let challenge_count = session.challenges().len();
        let assignments: Vec<Assignment> = session
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| Assignment {
                player_id: p.id,
                weapon: session.weapons()[i].clone(),
                challenge: session.challenges()[i % challenge_count].clone(),
            })
            .collect();
        for assignment in &assignments {
            session.apply_reveal(assignment);
        }
        session.finish_assignment(None);
    }
}
