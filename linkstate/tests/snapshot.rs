use linkstate::feedback::TopologyError;
use linkstate::network::Network;
use linkstate::topology::AdjacencyMatrix;

use common::graphs;
use common::virtual_network::VirtualSystem;

mod common;

#[test]
fn restored_network_keeps_converging() {
    let mut network = graphs::vnet_simple_weighted();
    network.converge();
    let state = network.freeze();

    let mut restored = Network::<VirtualSystem>::restore(&state).unwrap();
    for (a, b) in network.network.routers.iter().zip(&restored.routers) {
        assert_eq!(a.get_table(), b.get_table());
        assert_eq!(a.ord, b.ord);
    }

    // sequence tracking survives, so a further round is accepted everywhere
    let delivered = restored.delivered;
    for id in 0..5 {
        restored.emit(id).unwrap();
    }
    assert_eq!(restored.delivered, delivered + 5 * 5);
}

#[test]
fn restore_rejects_garbage() {
    assert!(Network::<VirtualSystem>::restore("{\"routers\": 3}").is_err());
}

#[test]
fn restore_rejects_mismatched_matrix() {
    let mut network = graphs::vnet_line();
    network.network.routers[1].adjacency = AdjacencyMatrix::new(5);
    let err = Network::<VirtualSystem>::restore(&network.freeze()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<TopologyError>(),
        Some(&TopologyError::MatrixSizeMismatch {
            expected: 3,
            actual: 5
        })
    );
}

#[test]
fn restore_rejects_lagging_registry() {
    let network = graphs::vnet_line();
    let state = network.freeze();
    assert!(state.contains("\"next_id\":3"));

    let lagging = state.replace("\"next_id\":3", "\"next_id\":1");
    let err = Network::<VirtualSystem>::restore(&lagging).unwrap_err();
    assert_eq!(
        err.to_string(),
        "registry has assigned 1 identities, but the snapshot holds 3 routers"
    );
}
