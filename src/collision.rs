//! Projectile/enemy hits and the enemy-reaches-player loss condition.

use crate::entities::{Enemy, Projectile};

/// Removes every projectile that hit an enemy together with the enemy it hit.
///
/// Each projectile takes out at most one enemy: the first live one in
/// enumeration order. An enemy consumed by an earlier projectile is no
/// longer a target for later ones. Removals happen after the scan.
/// Returns the number of enemies destroyed.
pub fn resolve_hits(projectiles: &mut Vec<Projectile>, enemies: &mut Vec<Enemy>) -> usize {
    let mut projectile_hit = vec![false; projectiles.len()];
    let mut enemy_hit = vec![false; enemies.len()];

    for (p_idx, projectile) in projectiles.iter().enumerate() {
        let bounds = projectile.bounds();
        let target = enemies
            .iter()
            .enumerate()
            .find(|(e_idx, enemy)| !enemy_hit[*e_idx] && enemy.bounds().overlaps(&bounds));

        if let Some((e_idx, _)) = target {
            projectile_hit[p_idx] = true;
            enemy_hit[e_idx] = true;
        }
    }

    let mut hit_flags = projectile_hit.into_iter();
    projectiles.retain(|_| !hit_flags.next().unwrap_or(false));

    let destroyed = enemy_hit.iter().filter(|&&hit| hit).count();
    let mut hit_flags = enemy_hit.into_iter();
    enemies.retain(|_| !hit_flags.next().unwrap_or(false));

    destroyed
}

/// True when any enemy's left edge has crossed the line in front of the player
pub fn enemy_reached_player(enemies: &[Enemy], danger_line_x: i32) -> bool {
    enemies.iter().any(|e| e.x < danger_line_x)
}
