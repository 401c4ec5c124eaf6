//! Routing scenarios across the whole chain

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        core::{Condition, EventKind, Handler, Outcome, Patient},
        handler::{
            ambulance::Ambulance, dispatch_center::DispatchCenter, pci_hospital::PciHospital,
            primary_hospital::PrimaryHospital,
        },
        orchestration::Chain,
        report::Recorder,
    };

    const PRIMARY: &str = "Primary Hospital";
    const DISPATCH: &str = "Dispatch Center";
    const AMBULANCE: &str = "Ambulance";
    const PCI: &str = "PCI Hospital";

    fn route(chain: &Chain, patient: &Patient) -> (Option<String>, Recorder) {
        let mut recorder = Recorder::default();
        let outcome = chain.handle(patient, &mut recorder);
        (outcome.resolved_by().map(str::to_string), recorder)
    }

    #[test]
    fn test_simple_patient_stops_at_primary() {
        let chain = Chain::standard();
        let (resolved, recorder) = route(&chain, &Patient::new("A", Condition::Simple));

        assert_eq!(resolved.as_deref(), Some(PRIMARY));
        assert_eq!(recorder.trail(), vec![(EventKind::Resolved, PRIMARY)]);
        assert_eq!(recorder.events()[0].patient, "A");
    }

    #[test]
    fn test_cardiovascular_patient_reaches_pci() {
        let chain = Chain::standard();
        let (resolved, recorder) = route(&chain, &Patient::new("B", Condition::Cardiovascular));

        assert_eq!(resolved.as_deref(), Some(PCI));
        assert_eq!(
            recorder.trail(),
            vec![
                (EventKind::Declined, PRIMARY),
                (EventKind::Transferred, DISPATCH),
                (EventKind::Transported, AMBULANCE),
                (EventKind::Resolved, PCI),
            ]
        );
    }

    #[test]
    fn test_unknown_condition_is_dropped() {
        let chain = Chain::standard();
        let mut recorder = Recorder::default();
        let outcome = chain.handle(&Patient::new("C", "unknown"), &mut recorder);

        assert_eq!(outcome, Outcome::Dropped);
        assert_eq!(
            recorder.trail(),
            vec![
                (EventKind::Declined, PRIMARY),
                (EventKind::Transferred, DISPATCH),
                (EventKind::Transported, AMBULANCE),
                (EventKind::Declined, PCI),
                (EventKind::Dropped, PCI),
            ]
        );
        assert!(recorder
            .events()
            .iter()
            .all(|e| e.kind != EventKind::Resolved));
    }

    #[test]
    fn test_dispatch_never_resolves() {
        let chain = Chain::standard();
        for condition in ["simple", "complex", "cardiovascular", "unknown", ""] {
            let (_, recorder) = route(&chain, &Patient::new("D", condition));
            assert!(!recorder
                .events()
                .iter()
                .any(|e| e.handler == DISPATCH && e.kind == EventKind::Resolved));
        }
    }

    #[test]
    fn test_first_match_wins() {
        // Both hospitals treat cardiovascular patients; the earlier one wins.
        let chain = Chain::new(vec![
            Arc::new(PrimaryHospital::new(
                PRIMARY,
                vec![Condition::Simple, Condition::Cardiovascular],
            )),
            Arc::new(DispatchCenter::default()),
            Arc::new(Ambulance::default()),
            Arc::new(PciHospital::default()),
        ])
        .unwrap();
        let (resolved, recorder) = route(&chain, &Patient::new("E", Condition::Cardiovascular));

        assert_eq!(resolved.as_deref(), Some(PRIMARY));
        assert!(recorder.events().iter().all(|e| e.handler == PRIMARY));
    }

    #[test]
    fn test_construction_order_decides_resolver() {
        let generalist = || -> Arc<dyn Handler> {
            Arc::new(PciHospital::new(
                "Regional Hospital",
                vec![Condition::Complex, Condition::Cardiovascular],
            ))
        };
        let specialist = || -> Arc<dyn Handler> { Arc::new(PciHospital::default()) };
        let patient = Patient::new("F", Condition::Cardiovascular);

        let forward = Chain::new(vec![generalist(), specialist()]).unwrap();
        let reverse = Chain::new(vec![specialist(), generalist()]).unwrap();

        assert_eq!(route(&forward, &patient).0.as_deref(), Some("Regional Hospital"));
        assert_eq!(route(&reverse, &patient).0.as_deref(), Some(PCI));
    }

    #[test]
    fn test_replay_is_idempotent() {
        let chain = Chain::standard();
        for patient in [
            Patient::new("G", Condition::Simple),
            Patient::new("H", Condition::Cardiovascular),
            Patient::new("I", Condition::Complex),
        ] {
            let (first, first_events) = route(&chain, &patient);
            let (second, second_events) = route(&chain, &patient);
            assert_eq!(first, second);
            assert_eq!(first_events.events(), second_events.events());
        }
    }

    #[test]
    fn test_single_handler_drops_without_error() {
        let chain = Chain::new(vec![Arc::new(PrimaryHospital::default())]).unwrap();
        let mut recorder = Recorder::default();
        let outcome = chain.handle(&Patient::new("J", Condition::Complex), &mut recorder);

        assert_eq!(outcome, Outcome::Dropped);
        assert_eq!(
            recorder.trail(),
            vec![(EventKind::Declined, PRIMARY), (EventKind::Dropped, PRIMARY)]
        );
    }

    #[test]
    fn test_chain_does_not_touch_patient() {
        let chain = Chain::standard();
        let patient = Patient::new("K", Condition::Cardiovascular);
        let before = patient.clone();
        route(&chain, &patient);
        assert_eq!(patient, before);
    }
}
