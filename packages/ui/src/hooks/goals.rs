use api::{goals, GoalPayload, InvestmentGoal};
use store::QueryKey;

use crate::auth::use_auth;
use crate::providers::use_api_client;
use crate::query::{
    use_api_mutation, use_api_query, MutationOptions, QueryOptions, UseMutation, UseQuery,
};

pub fn goals_key() -> QueryKey {
    QueryKey::root("investment-goals")
}

pub fn goal_key(id: &str) -> QueryKey {
    goals_key().join(id)
}

pub fn use_investment_goals() -> UseQuery<Vec<InvestmentGoal>> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    use_api_query(
        goals_key(),
        move || {
            let client = client.clone();
            async move { goals::list(&client).await }
        },
        QueryOptions::new()
            .enabled(enabled)
            .error_message("Could not load investment goals"),
    )
}

pub fn use_investment_goal(id: String) -> UseQuery<InvestmentGoal> {
    let client = use_api_client();
    let auth = use_auth();
    let enabled = auth().can_query();
    let fetch_id = id.clone();
    use_api_query(
        goal_key(&id),
        move || {
            let client = client.clone();
            let id = fetch_id.clone();
            async move { goals::get(&client, &id).await }
        },
        QueryOptions::new().enabled(enabled),
    )
}

pub fn use_create_goal() -> UseMutation<GoalPayload, InvestmentGoal> {
    let client = use_api_client();
    use_api_mutation(
        move |payload: GoalPayload| {
            let client = client.clone();
            async move { goals::create(&client, &payload).await }
        },
        MutationOptions::new()
            .invalidate(goals_key())
            .success_toast("Goal created"),
    )
}

/// Update a goal whose id is only known per call (inline grid edits);
/// sweeps the whole goals prefix, list and entities alike.
pub fn use_update_goal() -> UseMutation<(String, GoalPayload), InvestmentGoal> {
    let client = use_api_client();
    use_api_mutation(
        move |(id, payload): (String, GoalPayload)| {
            let client = client.clone();
            async move { goals::update(&client, &id, &payload).await }
        },
        MutationOptions::new()
            .invalidate_prefix(goals_key())
            .success_toast("Goal updated"),
    )
}
