use super::*;

#[test]
fn singletons_are_their_own_root() {
    let mut sets = LinkSets::default();
    assert_eq!(sets.find(LinkIdx(3)), LinkIdx(3));
    assert_eq!(sets.find(LinkIdx(0)), LinkIdx(0));
}

#[test]
fn earliest_index_becomes_root_transitively() {
    let mut sets = LinkSets::default();
    sets.union(LinkIdx(4), LinkIdx(2));
    sets.union(LinkIdx(2), LinkIdx(5));
    sets.union(LinkIdx(5), LinkIdx(1));
    for i in [1, 2, 4, 5] {
        assert_eq!(sets.find(LinkIdx(i)), LinkIdx(1));
    }
    assert_eq!(sets.find(LinkIdx(3)), LinkIdx(3));
}

#[test]
fn repeated_union_is_harmless() {
    let mut sets = LinkSets::default();
    sets.union(LinkIdx(0), LinkIdx(1));
    sets.union(LinkIdx(1), LinkIdx(0));
    assert_eq!(sets.find(LinkIdx(1)), LinkIdx(0));
}
