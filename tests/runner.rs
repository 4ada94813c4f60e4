use anyhow::{Result, bail};
use firstrank::testing::{assert_collections_equal, expected_min_ties};
use firstrank::*;
use std::collections::HashMap;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn scrambled(n: u32) -> Vec<(u32, u32)> {
    // (key, position) pairs with many ties on the smallest keys.
    (0..n).map(|i| ((i * 7919) % 97 / 10, i)).collect()
}

fn by_first() -> FirstRank<(u32, u32), u32, ToVec<(u32, u32)>, Vec<(u32, u32)>, Vec<(u32, u32)>> {
    FirstRank::classify_by(|p: &(u32, u32)| p.0, Ranking::natural(), ToVec::new())
}

#[test]
fn sequential_matches_brute_force() -> Result<()> {
    let data = scrambled(2_000);
    let expected = expected_min_ties(&data, |p| p.0);
    let out = Runner::sequential().run(&by_first(), data)?;
    assert_collections_equal(&out, &expected);
    Ok(())
}

#[test]
fn parallel_matches_sequential_in_order() -> Result<()> {
    init_logging();
    let data = scrambled(5_000);
    let collector = by_first();
    let seq = Runner::sequential().run(&collector, data.clone())?;

    for partitions in [1, 2, 3, 7, 16, 64] {
        for fanout in [2, 3, 8] {
            let runner = Runner::parallel(None, Some(partitions)).with_fanout(fanout);
            let par = runner.run(&collector, data.clone())?;
            assert_collections_equal(&par, &seq);
        }
    }
    Ok(())
}

#[test]
fn dedicated_thread_pool() -> Result<()> {
    init_logging();
    let data = scrambled(1_000);
    let collector = by_first();
    let seq = Runner::sequential().run(&collector, data.clone())?;
    let par = Runner::parallel(Some(2), Some(8)).run(&collector, data)?;
    assert_eq!(par, seq);
    Ok(())
}

#[test]
fn more_partitions_than_elements() -> Result<()> {
    let out = Runner::parallel(None, Some(32)).run(&FirstRank::natural(), vec![2, 1, 1])?;
    assert_eq!(out, vec![1, 1]);
    Ok(())
}

#[test]
fn huge_partition_count_is_clamped() -> Result<()> {
    let collector = FirstRank::natural();
    let out = Runner::parallel(None, Some(usize::MAX)).run(&collector, vec![2, 1, 1])?;
    assert_eq!(out, vec![1, 1]);
    let out = Runner::parallel(None, Some(1 << 40)).with_fanout(2).run(&collector, vec![3, 1, 2, 1])?;
    assert_eq!(out, vec![1, 1]);

    let grouped = Runner::parallel(None, Some(usize::MAX)).run_per_key(&collector, vec![('a', 2), ('a', 1), ('b', 5)])?;
    let mut grouped = grouped;
    grouped.sort_by_key(|(g, _)| *g);
    assert_eq!(grouped, vec![('a', vec![1]), ('b', vec![5])]);
    Ok(())
}

#[test]
fn empty_input_in_every_mode() -> Result<()> {
    let collector = FirstRank::<i32, _, _, _, _>::natural();
    assert!(Runner::sequential().run(&collector, Vec::new())?.is_empty());
    assert!(Runner::default().run(&collector, Vec::new())?.is_empty());
    assert!(Runner::parallel(Some(1), Some(4)).run(&collector, Vec::new())?.is_empty());
    Ok(())
}

#[test]
fn max_direction_in_parallel() -> Result<()> {
    let data: Vec<i64> = (0..1_000).map(|i| (i * 31) % 50).collect();
    let collector = multi_max().by_natural_order();
    let out = Runner::parallel(None, Some(10)).run(&collector, data)?;
    assert_eq!(out, vec![49; 20]);
    Ok(())
}

#[test]
fn keyed_output_in_parallel() -> Result<()> {
    let words = vec!["pear", "fig", "apple", "kiwi", "yam", "plum"];
    let collector = FirstRank::classify_by(|s: &&str| s.len(), Ranking::natural(), Count).with_key();
    let (len, n) = Runner::parallel(None, Some(3)).run(&collector, words)?;
    assert_eq!((len, n), (Some(3), 2));
    Ok(())
}

#[test]
fn error_propagates_from_a_partition() {
    let collector = FirstRank::try_classify_by(
        |v: &i32| {
            if *v < 0 {
                bail!("negative input {v}");
            }
            Ok(*v)
        },
        Ranking::natural(),
        ToVec::new(),
    );
    let data: Vec<i32> = (0..100).map(|i| if i == 73 { -1 } else { i }).collect();

    let seq = Runner::sequential().run(&collector, data.clone());
    let par = Runner::parallel(None, Some(8)).run(&collector, data);
    for result in [seq, par] {
        let err = result.expect_err("negative input must fail");
        assert!(err.to_string().contains("negative input -1"), "{err}");
    }
}

#[test]
fn per_key_matches_sequential_per_group() -> Result<()> {
    let rows: Vec<(char, u32)> = (0..600u32)
        .map(|i| {
            let group = ['a', 'b', 'c'][(i % 3) as usize];
            (group, (i * 13) % 40)
        })
        .collect();

    let mut expected: HashMap<char, Vec<u32>> = HashMap::new();
    for (g, v) in &rows {
        expected.entry(*g).or_default().push(*v);
    }
    let expected: HashMap<char, Vec<u32>> = expected
        .into_iter()
        .map(|(g, vs)| (g, expected_min_ties(&vs, |v| *v)))
        .collect();

    let collector = FirstRank::natural();
    for runner in [Runner::sequential(), Runner::parallel(None, Some(5))] {
        let out: HashMap<char, Vec<u32>> = runner.run_per_key(&collector, rows.clone())?.into_iter().collect();
        assert_eq!(out, expected);
    }
    Ok(())
}

#[test]
fn per_key_empty_input() -> Result<()> {
    let out = Runner::default().run_per_key(&FirstRank::<u8, _, _, _, _>::natural(), Vec::<(u8, u8)>::new())?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn unordered_downstream_in_parallel() -> Result<()> {
    let data: Vec<u32> = (0..500).map(|i| i % 25).collect();
    let collector = FirstRank::classify_by(|v: &u32| v % 5, Ranking::natural(), DistinctCount::new());
    let n = Runner::parallel(None, Some(9)).with_fanout(2).run(&collector, data)?;
    // 0, 5, 10, 15, 20
    assert_eq!(n, 5);
    Ok(())
}
