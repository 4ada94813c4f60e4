use anyhow::Result;
use firstrank::testing::*;
use firstrank::*;

type VecRank = FirstRank<&'static str, &'static str, ToVec<&'static str>, Vec<&'static str>, Vec<&'static str>>;

/// Feeds `left` and `right` into two accumulators, merges, finishes.
fn merge_and_finish(collector: &VecRank, left: &[&'static str], right: &[&'static str]) -> Result<Vec<&'static str>> {
    let l = collector.fold(left.iter().copied())?;
    let r = collector.fold(right.iter().copied())?;
    let merged = collector.merge(l, r)?;
    Ok(collector.finish(merged))
}

#[test]
fn left_nothing_right_nothing() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &[], &[])?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn left_something_right_nothing() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &["a"], &[])?;
    assert_eq!(out, vec!["a"]);
    Ok(())
}

#[test]
fn left_nothing_right_something() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &[], &["a"])?;
    assert_eq!(out, vec!["a"]);
    Ok(())
}

#[test]
fn left_a_right_a() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &["a"], &["a"])?;
    assert_eq!(out, vec!["a", "a"]);
    Ok(())
}

#[test]
fn left_a_right_b() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &["a"], &["b"])?;
    assert_eq!(out, vec!["a"]);
    Ok(())
}

#[test]
fn left_b_right_a() -> Result<()> {
    let out = merge_and_finish(&FirstRank::natural(), &["b"], &["a"])?;
    assert_eq!(out, vec!["a"]);
    Ok(())
}

#[test]
fn all_tied_merge_keeps_left_then_right() -> Result<()> {
    let everything_ties = FirstRank::compare_by(Ranking::by_key(|_: &&str| true));
    let out = merge_and_finish(&everything_ties, &["d", "c"], &["b", "a"])?;
    assert_eq!(out, vec!["d", "c", "b", "a"]);
    Ok(())
}

#[test]
fn merge_keeps_left_key_on_tie() -> Result<()> {
    let collector = FirstRank::classify_by(|p: &(u8, char)| p.0, Ranking::natural(), ToVec::new());
    let l = collector.fold(vec![(1, 'a')])?;
    let r = collector.fold(vec![(1, 'b'), (2, 'c')])?;
    let merged = collector.merge(l, r)?;
    assert_eq!(merged.key(), Some(&1));
    assert_eq!(merged.container(), &vec![(1, 'a'), (1, 'b')]);
    Ok(())
}

#[test]
fn merge_propagates_ranking_errors() {
    let collector = FirstRank::compare_by(Ranking::non_null(Ranking::<u8>::natural()));
    let l = collector.fold(vec![None]).expect("a single element is never compared");
    let r = collector.fold(vec![Some(1)]).expect("a single element is never compared");
    assert!(collector.merge(l, r).is_err());
}

#[test]
fn every_split_and_association_matches_sequential() -> Result<()> {
    let input: Vec<(u32, usize)> = (0..24usize).map(|i| (((i * 7) % 5) as u32, i)).collect();
    let collector = FirstRank::classify_by(|p: &(u32, usize)| p.0, Ranking::natural(), ToVec::new());
    let sequential = input.clone().into_iter().first_rank(&collector)?;
    assert_eq!(sequential.len(), 5);

    for a in 0..=input.len() {
        for b in a..=input.len() {
            for c in (b..=input.len()).step_by(5) {
                let parts = split_at_offsets(input.clone(), &[a, b, c]);
                for plan in MergePlan::ALL {
                    let out = run_partitioned(&collector, parts.clone(), plan)?;
                    assert_eq!(out, sequential, "split at {a},{b},{c} with {plan:?}");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn max_ties_across_partitions() -> Result<()> {
    let collector = Direction::Max.by_natural_order();
    let parts = vec![vec![5, 9, 1], vec![9], vec![], vec![2, 9, 9]];
    for plan in MergePlan::ALL {
        let out = run_partitioned(&collector, parts.clone(), plan)?;
        assert_eq!(out, vec![9, 9, 9, 9]);
    }
    Ok(())
}

#[test]
fn unordered_downstream_merges_as_multiset() -> Result<()> {
    let collector = FirstRank::classify_by(|s: &String| s.len(), Ranking::natural(), DistinctCount::new());
    let parts = vec![
        vec!["bb".to_string(), "x".to_string()],
        vec!["y".to_string(), "x".to_string()],
        vec!["zzz".to_string()],
    ];
    for plan in MergePlan::ALL {
        assert_eq!(run_partitioned(&collector, parts.clone(), plan)?, 2);
    }
    Ok(())
}
