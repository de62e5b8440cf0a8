use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use keggraph::graph::populate;
use keggraph::{
    graph_measures, process_request_text, projected_graph, GraphStore, MeasuresConfig, NodeId,
    ParseMode,
};

/// Synthetic gene -> ortholog link: every ortholog is shared by `fanout` genes
fn link_lists(genes: usize, fanout: usize) -> (Vec<NodeId>, Vec<NodeId>) {
    let sources = (0..genes).map(|i| NodeId::from(format!("hsa:{}", i))).collect();
    let targets = (0..genes)
        .map(|i| NodeId::from(format!("ko:K{:05}", i / fanout)))
        .collect();
    (sources, targets)
}

fn link_graph(genes: usize, fanout: usize) -> GraphStore {
    let (mut sources, mut targets) = link_lists(genes, fanout);
    // Chain consecutive orthologs through a shared gene so the graph is connected
    for i in (fanout..genes).step_by(fanout) {
        sources.push(NodeId::from(format!("hsa:{}", i)));
        targets.push(NodeId::from(format!("ko:K{:05}", i / fanout - 1)));
    }
    let mut graph = GraphStore::new("hsa_to_ko");
    populate(&mut graph, &sources, &targets, "hsa", "ko").unwrap();
    graph
}

/// Benchmark building typed graphs from link lists
fn bench_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate");

    for size in [1_000, 10_000, 100_000].iter() {
        let (sources, targets) = link_lists(*size, 10);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut graph = GraphStore::new("hsa_to_ko");
                populate(&mut graph, &sources, &targets, "hsa", "ko").unwrap();
                criterion::black_box(graph.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark parsing a LINK response
fn bench_parse_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_bipartite_list");

    for size in [1_000, 10_000, 100_000].iter() {
        let text: String = (0..*size)
            .map(|i| format!("hsa:{}\tko:K{:05}\n", i, i / 10))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let parsed = process_request_text(&text, ParseMode::BipartiteList).unwrap();
                criterion::black_box(parsed);
            });
        });
    }
    group.finish();
}

/// Benchmark projection onto the gene side
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projected_graph");

    for size in [1_000, 10_000].iter() {
        let graph = link_graph(*size, 10);
        let genes = graph.get_nodes_by_category("hsa").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let projection = projected_graph(&graph, &genes, None).unwrap();
                criterion::black_box(projection.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark measures (components, cliques, eccentricities)
fn bench_measures(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_measures");
    group.sample_size(10);

    let config = MeasuresConfig {
        clique_limit: Some(100_000),
    };
    for size in [500, 2_000].iter() {
        let graph = link_graph(*size, 5);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let measures = graph_measures(&graph, &config).unwrap();
                criterion::black_box(measures);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_populate,
    bench_parse_link,
    bench_projection,
    bench_measures
);
criterion_main!(benches);
