use crate::catalog::Weapon;
use crate::errors::WheelError;
use crate::player::PlayerId;
use crate::rng::DrawRng;
use crate::session::Session;

/// Resample attempts before falling back to a deterministic pick. Pools are
/// at most catalog-sized, so this bound is generous.
const MAX_RESAMPLE: usize = 16;

/// Replace one revealed player's weapon and redraw their challenge,
/// consuming a reroll credit.
///
/// Silent no-ops (Ok, nothing consumed, nothing mutated): unknown player,
/// no credits left, no current weapon, or an assignment run in flight.
/// Under no-duplicate policy, a candidate set that offers no weapon other
/// than the current one fails with [`WheelError::NoAlternativeWeapon`].
pub fn reroll_player<R: DrawRng>(
    session: &mut Session,
    player_id: PlayerId,
    rng: &mut R,
) -> Result<(), WheelError> {
    if session.is_assigning() {
        tracing::debug!(player_id, "reroll ignored during assignment run");
        return Ok(());
    }
    let Some(player) = session.player(player_id) else {
        return Ok(());
    };
    if player.rerolls_left == 0 {
        return Ok(());
    }
    let Some(current) = player.weapon.clone() else {
        return Ok(());
    };

    let active = session.active_weapons();
    let next = if session.allow_duplicate() {
        match active.len() {
            // Nothing to draw from; the pool was emptied since assignment.
            0 => return Ok(()),
            // Sole weapon is reassigned unchanged; the credit is still spent.
            1 => active[0].clone(),
            _ => resample(&active, &current, rng),
        }
    } else {
        // Candidates are the active weapons not held by *other* players.
        // The player's own weapon stays in the set; the resample loop
        // filters it out when alternatives exist.
        let held_by_others: Vec<&str> = session
            .players()
            .iter()
            .filter(|p| p.id != player_id)
            .filter_map(|p| p.weapon.as_ref().map(|w| w.name.as_str()))
            .collect();
        let candidates: Vec<Weapon> = active
            .into_iter()
            .filter(|w| !held_by_others.contains(&w.name.as_str()))
            .collect();
        let only_current =
            candidates.len() <= 1 && candidates.first().is_none_or(|w| w.name == current.name);
        if only_current {
            return Err(WheelError::NoAlternativeWeapon);
        }
        resample(&candidates, &current, rng)
    };

    let challenge_idx = rng.pick_index(session.challenges().len());
    let challenge = session.challenges()[challenge_idx].clone();
    session.apply_reroll(player_id, next, challenge);
    Ok(())
}

/// Uniform draw rejecting the current weapon, bounded to `MAX_RESAMPLE`
/// attempts with a deterministic fallback so a pathological sequence can
/// never loop forever. If the pool holds only the current weapon, it is
/// returned unchanged.
fn resample<R: DrawRng>(pool: &[Weapon], current: &Weapon, rng: &mut R) -> Weapon {
    for _ in 0..MAX_RESAMPLE {
        let candidate = &pool[rng.pick_index(pool.len())];
        if candidate.name != current.name {
            return candidate.clone();
        }
    }
    pool.iter()
        .find(|w| w.name != current.name)
        .unwrap_or(current)
        .clone()
}
