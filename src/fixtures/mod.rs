//! Development seed data
//!
//! One-shot batch load: 10 users and 40 treasures are staged without
//! flushing, then each repository commits once. Runs before the server
//! starts accepting requests, never concurrently with it. Data is
//! deterministic, derived from static pools.

use crate::core::store::Repository;
use crate::entities::treasure::Treasure;
use crate::entities::user::User;
use anyhow::Result;

pub const USER_COUNT: usize = 10;
pub const TREASURE_COUNT: usize = 40;

const USERNAMES: [&str; 10] = [
    "smaug", "bilbo", "gollum", "thorin", "bard", "elrond", "gandalf", "balin", "dwalin", "fili",
];

const TREASURE_NAMES: [&str; 8] = [
    "Golden Chalice",
    "Arkenstone Shard",
    "Silver Crown",
    "Jeweled Dagger",
    "Mithril Ring",
    "Dragon Scale",
    "Ancient Coin Hoard",
    "Elven Brooch",
];

const DESCRIPTIONS: [&str; 4] = [
    "Recovered from the deepest vault of a long-abandoned mountain hall.\nStill warm to the touch.",
    "An heirloom passed down through seven generations of burglars, each of whom swore it was honestly acquired.",
    "Glitters faintly in the dark.\nNobody who carried it kept it for long.",
    "Appraised once, stolen twice, cursed at least three times according to the previous owner.",
];

/// Stage and commit the full development dataset
pub async fn load(
    users: &dyn Repository<User>,
    treasures: &dyn Repository<Treasure>,
) -> Result<()> {
    let mut owners = Vec::with_capacity(USER_COUNT);
    for username in USERNAMES {
        let user = User::new(username);
        owners.push(user.id);
        users.save(user, false).await?;
    }
    users.flush().await?;

    for i in 0..TREASURE_COUNT {
        let mut treasure = Treasure::new(format!(
            "{} no{}",
            TREASURE_NAMES[i % TREASURE_NAMES.len()],
            i + 1
        ));
        treasure.set_text_description(DESCRIPTIONS[i % DESCRIPTIONS.len()]);
        treasure.value = ((i as i64) * 137 + 50) % 5_000;
        treasure.coolfactor = ((i as i64) * 73) % 901;
        treasure.is_published = i % 3 == 0;
        treasure.owner_id = Some(owners[i % owners.len()]);
        treasures.save(treasure, false).await?;
    }
    treasures.flush().await?;

    tracing::info!(
        users = USER_COUNT,
        treasures = TREASURE_COUNT,
        "fixtures loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryRepository;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_load_commits_expected_counts() {
        let users = InMemoryRepository::new();
        let treasures = InMemoryRepository::new();

        load(&users, &treasures).await.unwrap();

        assert_eq!(users.find_all().await.unwrap().len(), USER_COUNT);
        assert_eq!(treasures.find_all().await.unwrap().len(), TREASURE_COUNT);
        assert_eq!(users.pending_len(), 0);
        assert_eq!(treasures.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_seeded_treasures_are_valid() {
        let users = InMemoryRepository::new();
        let treasures = InMemoryRepository::new();
        load(&users, &treasures).await.unwrap();

        let owners: std::collections::HashMap<_, _> = users
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        for treasure in treasures.find_all().await.unwrap() {
            let owner = treasure.owner_id.and_then(|id| owners.get(&id));
            assert!(
                treasure.validate(owner).is_empty(),
                "seed treasure '{}' should be valid",
                treasure.name
            );
        }
    }

    #[tokio::test]
    async fn test_every_user_owns_treasures() {
        let users = InMemoryRepository::new();
        let treasures = InMemoryRepository::new();
        load(&users, &treasures).await.unwrap();

        let owning: HashSet<_> = treasures
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|t| t.owner_id)
            .collect();
        assert_eq!(owning.len(), USER_COUNT);
    }
}
