use super::*;

#[test]
fn test_node_new() {
    let parent = NodeId::from_index(3);
    let mut node = Node::new(42_u32, Some(parent));

    assert_eq!(*node.as_value(), 42);
    assert_eq!(node.to_color(), Color::Red);
    assert!(node.is_red());
    assert_eq!(node.to_parent(), Some(parent));
    assert_eq!(node.to_left(), None);
    assert_eq!(node.to_right(), None);
    assert_eq!(format!("{:?}", node), "(r)<42>");

    node.set_black();
    assert_eq!(node.to_color(), Color::Black);
    assert!(node.is_black());
    assert_eq!(format!("{:?}", node), "(b)<42>");

    node.set_red();
    assert!(!node.is_black());
}

#[test]
fn test_node_id() {
    for index in [0_usize, 1, 17, 1_000_000].iter() {
        assert_eq!(NodeId::from_index(*index).to_index(), *index);
    }
}
