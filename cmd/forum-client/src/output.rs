//! Plain-text rendering of state snapshots.

use domains::{User, Votable, VoteState};
use services::selectors::{auth_user_id, ranked_leaderboard, visible_threads};
use services::RootState;

pub fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("id: {}", user.id);
}

pub fn print_threads(state: &RootState) {
    let threads = &state.threads;
    if !threads.categories.is_empty() {
        println!("categories: {}", threads.categories.join(", "));
    }
    let visible = visible_threads(threads);
    if visible.is_empty() {
        println!("no threads");
        return;
    }
    for thread in visible {
        let owner = thread
            .owner
            .as_ref()
            .map(|u| u.name.as_str())
            .unwrap_or("unknown");
        println!(
            "[{}] #{} {} by {} ({:+}, {} comments)",
            thread.id,
            thread.category,
            thread.title,
            owner,
            thread.score(),
            thread.total_comments
        );
    }
}

pub fn print_detail(state: &RootState) {
    let Some(detail) = &state.threads.thread_detail else {
        println!("no thread loaded");
        return;
    };
    let me = auth_user_id(state);

    println!("{} #{}", detail.title, detail.category);
    println!("by {} at {}", detail.owner.name, detail.created_at);
    println!("score {:+}{}", detail.score(), marker(me.map(|id| detail.vote_of(id))));
    println!();
    println!("{}", detail.body);
    println!();
    println!("{} comments", detail.comments.len());
    for comment in &detail.comments {
        println!(
            "  [{}] {}: {} ({:+}{})",
            comment.id,
            comment.owner.name,
            comment.content,
            comment.score(),
            marker(me.map(|id| comment.vote_of(id)))
        );
    }
}

fn marker(vote: Option<VoteState>) -> &'static str {
    match vote {
        Some(VoteState::Up) => ", you voted up",
        Some(VoteState::Down) => ", you voted down",
        _ => "",
    }
}

pub fn print_leaderboard(state: &RootState) {
    for (rank, entry) in ranked_leaderboard(state) {
        println!("{rank:>3}. {:<24} {:>6}", entry.user.name, entry.score);
    }
}
