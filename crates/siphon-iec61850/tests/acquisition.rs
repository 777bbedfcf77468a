// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! End-to-end tests of the acquisition lifecycle against the simulated
//! IED transport: stop/join visibility, reconfiguration atomicity,
//! reconnect behavior and decode-to-ingest delivery.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep, timeout};

use siphon_config::AcquisitionSettings;
use siphon_core::{ChannelSink, Reading, RecordValue};
use siphon_iec61850::client::{SimOp, SimTransportFactory};
use siphon_iec61850::{IedController, MmsValue};

const DEFAULT_REFERENCE: &str = "simpleIOGenericIO/GGIO1.SPCSO1.stVal";

fn harness(
    factory: SimTransportFactory,
) -> (Arc<IedController>, Arc<SimTransportFactory>, UnboundedReceiver<Reading>) {
    let factory = Arc::new(factory);
    let controller = Arc::new(IedController::new(
        AcquisitionSettings::default(),
        Arc::clone(&factory) as Arc<dyn siphon_iec61850::client::TransportFactory>,
    ));

    let (sink, rx) = ChannelSink::unbounded();
    controller.register_sink(Arc::new(sink)).unwrap();

    (controller, factory, rx)
}

/// Waits until the predicate holds over the recorded operations.
async fn wait_for_ops(
    server: &siphon_iec61850::client::SimServer,
    predicate: impl Fn(&[SimOp]) -> bool,
) {
    timeout(Duration::from_secs(2), async {
        loop {
            if predicate(&server.ops()) {
                return;
            }
            sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn boolean_true_ingests_canonical_numeric_record() {
    let (controller, _factory, mut rx) = harness(SimTransportFactory::with_value(
        DEFAULT_REFERENCE,
        MmsValue::Boolean(true),
    ));

    controller.start().await.unwrap();

    let reading = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out")
        .expect("channel open");

    assert_eq!(reading.asset, "iec61850");
    assert_eq!(reading.record.name, "MMS_BOOLEAN");
    assert_eq!(reading.record.value, RecordValue::Integer(1));

    controller.stop().await;
}

#[tokio::test]
async fn stop_returns_only_after_the_loop_fully_exited() {
    let (controller, factory, mut rx) = harness(SimTransportFactory::with_value(
        DEFAULT_REFERENCE,
        MmsValue::Float32(1.0),
    ));
    let server = factory.server();

    controller.start().await.unwrap();

    // Let it poll for a bit.
    timeout(Duration::from_secs(1), rx.recv()).await.unwrap();

    controller.stop().await;
    assert!(!controller.is_running().await);

    // No transport operation may happen once stop() has returned.
    let ops_at_stop = server.op_count();
    sleep(Duration::from_millis(50)).await;
    assert_eq!(server.op_count(), ops_at_stop);

    // The connection handle was released on the way out.
    assert_eq!(server.ops().last(), Some(&SimOp::Close));
}

#[tokio::test]
async fn three_failed_connects_then_recovery_with_no_early_read() {
    let factory = SimTransportFactory::with_value(DEFAULT_REFERENCE, MmsValue::Unsigned(7));
    factory.server().refuse_connects(3);
    let (controller, factory, mut rx) = harness(factory);
    let server = factory.server();

    controller.start().await.unwrap();

    // The loop must survive the failures and eventually deliver a reading.
    let reading = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("loop should recover once the transport is reachable")
        .unwrap();
    assert_eq!(reading.record.name, "MMS_UNSIGNED");
    assert!(controller.is_running().await);

    controller.stop().await;

    let ops = server.ops();
    let first_ok_connect = ops
        .iter()
        .position(|op| matches!(op, SimOp::Connect { ok: true }))
        .expect("a connect must eventually succeed");

    let failed_before_success = ops[..first_ok_connect]
        .iter()
        .filter(|op| matches!(op, SimOp::Connect { ok: false }))
        .count();
    assert_eq!(failed_before_success, 3, "all three refusals happen first");

    // No read is attempted before the first successful connect.
    let first_read = ops
        .iter()
        .position(|op| matches!(op, SimOp::Read { .. }))
        .expect("a read must follow the successful connect");
    assert!(first_ok_connect < first_read);
}

#[tokio::test]
async fn connection_loss_falls_back_to_reconnect_and_continues() {
    let factory = SimTransportFactory::with_value(DEFAULT_REFERENCE, MmsValue::Integer(5));
    factory.server().drop_after_reads(2);
    let (controller, factory, mut rx) = harness(factory);
    let server = factory.server();

    controller.start().await.unwrap();

    // Five readings require at least two connection lifetimes.
    for _ in 0..5 {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("acquisition should keep delivering across reconnects")
            .unwrap();
    }

    controller.stop().await;

    let ok_connects = server
        .ops()
        .iter()
        .filter(|op| matches!(op, SimOp::Connect { ok: true }))
        .count();
    assert!(ok_connects >= 2, "expected reconnects, got {}", ok_connects);
}

#[tokio::test]
async fn reconfigure_never_exposes_a_half_updated_reference() {
    const NEW_REFERENCE: &str = "simpleIOGenericIO/MMXU1.TotW.mag";

    let factory = SimTransportFactory::with_value(DEFAULT_REFERENCE, MmsValue::Float64(0.5));
    factory
        .server()
        .set_value(NEW_REFERENCE, MmsValue::Float64(1.5));
    let (controller, factory, _rx) = harness(factory);
    let server = factory.server();

    controller.start().await.unwrap();
    wait_for_ops(&server, |ops| {
        ops.iter().any(|op| matches!(op, SimOp::Read { .. }))
    })
    .await;

    // Swap node, CDC and attribute in one reconfiguration while polls are
    // in flight.
    let mut settings = AcquisitionSettings::default();
    settings.set_logical_node("MMXU1");
    settings.set_cdc("TotW");
    settings.set_attribute("mag");
    settings.set_functional_constraint("MX");
    controller.reconfigure(settings).await.unwrap();

    wait_for_ops(&server, |ops| {
        ops.iter()
            .any(|op| matches!(op, SimOp::Read { reference } if reference == NEW_REFERENCE))
    })
    .await;

    controller.stop().await;

    // Every read used either the complete old reference or the complete
    // new one; no mixed composition ever reached the wire.
    for reference in server.read_references() {
        assert!(
            reference == DEFAULT_REFERENCE || reference == NEW_REFERENCE,
            "half-updated reference observed: {}",
            reference
        );
    }
}

#[tokio::test]
async fn non_record_values_are_skipped_without_disturbing_the_loop() {
    let (controller, factory, mut rx) = harness(SimTransportFactory::with_value(
        DEFAULT_REFERENCE,
        MmsValue::Unsupported(3),
    ));
    let server = factory.server();

    controller.start().await.unwrap();

    // Unsupported values produce no readings while the loop keeps polling.
    wait_for_ops(&server, |ops| {
        ops.iter()
            .filter(|op| matches!(op, SimOp::Read { .. }))
            .count()
            >= 3
    })
    .await;
    assert!(rx.try_recv().is_err());

    // Subsequent iterations are unaffected: a decodable value flows again.
    server.set_value(DEFAULT_REFERENCE, MmsValue::VisibleString("ok".into()));
    let reading = timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("loop should still be alive")
        .unwrap();
    assert_eq!(reading.record.name, "MMS_VISIBLE_STRING");
    assert_eq!(reading.record.value, RecordValue::Text("ok".into()));

    controller.stop().await;
}

#[tokio::test]
async fn readings_preserve_read_completion_order() {
    let (controller, factory, mut rx) = harness(SimTransportFactory::with_value(
        DEFAULT_REFERENCE,
        MmsValue::Integer(0),
    ));
    let server = factory.server();

    controller.start().await.unwrap();

    // Timestamps of successive readings never go backwards.
    let mut last = None;
    for _ in 0..4 {
        let reading = timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        if let Some(previous) = last {
            assert!(reading.timestamp >= previous);
        }
        last = Some(reading.timestamp);
    }

    controller.stop().await;
    assert!(server.op_count() > 0);
}
