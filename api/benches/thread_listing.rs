use std::collections::HashMap;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::RngExt;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("thread_listing");
    for n in [10usize, 100, 1_000, 10_000, 100_000].iter() {
        let comments = generate_comments(*n);
        group.bench_function(BenchmarkId::new("annotate_and_sort", n), |b| {
            b.iter(|| annotate_and_sort(comments.clone()))
        });
    }
    group.finish();
}

#[derive(Clone)]
struct Comment {
    id: String,
    parent_id: Option<String>,
    path: String,
    result: f64,
    created_at: chrono::NaiveDateTime,
}

#[allow(dead_code)]
#[derive(Clone)]
struct Node {
    id: String,
    parent_id: Option<String>,
    parent_result: Option<f64>,
    depth: usize,
    full_path: String,
    created_at: chrono::NaiveDateTime,
}

/// Random reply tree: each comment replies to a previously generated one
/// or starts a new root.
fn generate_comments(n: usize) -> Vec<Comment> {
    let mut comments: Vec<Comment> = Vec::with_capacity(n);
    for _ in 0..n {
        let parent = if comments.is_empty() || rand::rng().random_range(0..4) == 0 {
            None
        } else {
            let idx = rand::rng().random_range(0..comments.len());
            Some(&comments[idx])
        };

        let (parent_id, path) = match parent {
            None => (None, String::new()),
            Some(p) => (
                Some(p.id.clone()),
                if p.path.is_empty() {
                    p.id.clone()
                } else {
                    format!("{}/{}", p.path, p.id)
                },
            ),
        };

        comments.push(Comment {
            id: uuid::Uuid::new_v4().to_string(),
            parent_id,
            path,
            result: rand::rng().random_range(-1000..1000) as f64,
            created_at: chrono::offset::Local::now().naive_local(),
        });
    }
    comments
}

// Mirrors the read path's materialization: join each row to its parent's
// result, annotate depth and full path, sort by full path.
fn annotate_and_sort(comments: Vec<Comment>) -> Vec<Node> {
    let results_by_id: HashMap<String, f64> = comments
        .iter()
        .map(|c| (c.id.clone(), c.result))
        .collect();

    let mut nodes: Vec<Node> = comments
        .into_iter()
        .map(|c| {
            let depth = if c.path.is_empty() {
                0
            } else {
                c.path.split('/').count()
            };
            let full_path = if c.path.is_empty() {
                c.id.clone()
            } else {
                format!("{}/{}", c.path, c.id)
            };
            let parent_result = c
                .parent_id
                .as_ref()
                .and_then(|p| results_by_id.get(p))
                .copied();

            Node {
                id: c.id,
                parent_id: c.parent_id,
                parent_result,
                depth,
                full_path,
                created_at: c.created_at,
            }
        })
        .collect();

    nodes.sort_unstable_by(|a, b| {
        a.full_path
            .cmp(&b.full_path)
            .then(a.created_at.cmp(&b.created_at))
    });

    nodes
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
