// Criterion benchmarks for Career Crafter

use career_crafter::core::{extract_tags, jaccard_similarity, Ranker, RuleTagger, TagSet};
use career_crafter::models::{Job, Profile};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

const SKILLS: &[&str] = &[
    "Rust", "Go", "Python", "React", "Node.js", "MongoDB", "PostgreSQL", "Docker", "Kubernetes",
    "AWS", "GraphQL", "TypeScript",
];

const BIOS: &[&str] = &[
    "Backend developer building reliable distributed services",
    "Frontend engineer with a passion for accessible design systems",
    "Data scientist working on recommendation models and analytics pipelines",
    "Full stack developer shipping web applications for early stage startups",
    "DevOps engineer automating infrastructure and continuous delivery",
];

fn create_profile(id: usize) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: format!("freelancer_{}", id),
        user_bio: BIOS[id % BIOS.len()].to_string(),
        user_about: "Experienced remote contractor. Available for long term projects.".to_string(),
        user_skills: (0..3)
            .map(|k| SKILLS[(id + k * 5) % SKILLS.len()].to_string())
            .collect(),
        ..Profile::default()
    }
}

fn create_job() -> Job {
    Job {
        job_title: "Senior Backend Engineer".to_string(),
        job_description: "We are looking for an experienced backend engineer to design and \
                          build scalable services. You will own our data pipelines and APIs."
            .to_string(),
        job_skills: vec!["Rust".to_string(), "PostgreSQL".to_string(), "Docker".to_string()],
        ..Job::default()
    }
}

fn bench_extract_tags(c: &mut Criterion) {
    let tagger = RuleTagger::default();
    let job = create_job();
    let text = job.ranking_text();

    c.bench_function("extract_tags_job", |b| {
        b.iter(|| extract_tags(&tagger, black_box(&text), black_box(&job.job_skills)))
    });
}

fn bench_jaccard(c: &mut Criterion) {
    let a: TagSet = (0..40).map(|i| format!("tag{}", i)).collect();
    let b: TagSet = (20..60).map(|i| format!("tag{}", i)).collect();

    c.bench_function("jaccard_similarity_40", |bench| {
        bench.iter(|| jaccard_similarity(black_box(&a), black_box(&b)))
    });
}

fn bench_rank_profiles(c: &mut Criterion) {
    let ranker = Ranker::default();
    let job = create_job();
    let mut group = c.benchmark_group("rank_profiles");

    for size in [10, 100, 1000].iter() {
        let profiles: Vec<Profile> = (0..*size).map(create_profile).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &profiles, |b, profiles| {
            b.iter(|| ranker.rank_profiles(black_box(profiles), Some(black_box(&job))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_tags, bench_jaccard, bench_rank_profiles);
criterion_main!(benches);
