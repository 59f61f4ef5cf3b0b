use acmi_core::engine::{Engine, Outcome};

/// End-to-end run of a short recording through the engine, covering
/// session bootstrap, object creation/update, and time advancement —
/// without any socket or database involved.
#[test]
fn full_session_lifecycle_without_io() {
    let mut engine = Engine::new();

    assert!(matches!(
        engine.process(b"0,ReferenceLatitude=0.0").unwrap(),
        Outcome::HeaderAccumulated
    ));
    assert!(matches!(
        engine.process(b"0,ReferenceLongitude=0.0").unwrap(),
        Outcome::HeaderAccumulated
    ));
    assert!(matches!(
        engine
            .process(b"0,DataSource=Mission")
            .unwrap(),
        Outcome::HeaderAccumulated
    ));
    assert!(matches!(
        engine
            .process(b"0,RecordingTime=2019-01-01T12:12:01.101Z")
            .unwrap(),
        Outcome::SessionReady
    ));

    engine.bind_session_id(42);

    let outcome = engine.process(b"#1.01").unwrap();
    assert!(matches!(outcome, Outcome::Tick(1.01)));
    assert_eq!(engine.reference.time_offset, 1.01);

    let outcome = engine
        .process(b"802,T=1.0|2.0|100,Type=Air+FixedWing,Name=Eagle11,Color=Blue")
        .unwrap();
    let Outcome::Created(rec) = outcome else {
        panic!("expected creation");
    };
    assert_eq!(rec.session_id, 42);
    assert_eq!(rec.updates, 1);
    engine.bind_object_id(0x802, 1);

    let outcome = engine.process(b"#2.01").unwrap();
    assert!(matches!(outcome, Outcome::Tick(2.01)));

    let outcome = engine.process(b"802,T=1.1|2.1|150").unwrap();
    let Outcome::Updated(rec) = outcome else {
        panic!("expected update");
    };
    assert_eq!(rec.updates, 2);
    assert!(rec.velocity_kts > 0.0);

    let outcome = engine.process(b"-802").unwrap();
    let Outcome::Removed { rec, .. } = outcome else {
        panic!("expected removal");
    };
    assert!(!rec.alive);
    assert_eq!(rec.updates, 3);
}

#[test]
fn object_update_before_session_bound_is_rejected() {
    let mut engine = Engine::new();
    let result = engine.process(b"802,Name=FARP");
    assert!(result.is_err());
}
