//! Mapeo de transiciones a mensajes para el usuario
//!
//! Función pura, sin efectos: el caller decide cómo mostrar el mensaje.
//! La copy vive solo acá, desacoplada de la validación de transiciones.

use crate::models::ride::RideStatus;
use crate::services::ride_lifecycle::Transition;

/// Mensaje a mostrar cuando se observa una transición de estado
pub fn describe(transition: &Transition) -> String {
    match transition.to {
        RideStatus::EnRoute => "Your driver is on the way!".to_string(),
        RideStatus::Completed => "Your ride has been completed. Thank you!".to_string(),
        other => format!("Status updated to {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RideStatus::*;

    #[test]
    fn en_route_announces_the_driver() {
        let msg = describe(&Transition {
            from: Pending,
            to: EnRoute,
        });
        assert_eq!(msg, "Your driver is on the way!");
    }

    #[test]
    fn completed_thanks_the_rider() {
        // Vale tanto para en-route -> completed como para el completado directo
        for from in [Pending, EnRoute] {
            let msg = describe(&Transition {
                from,
                to: Completed,
            });
            assert_eq!(msg, "Your ride has been completed. Thank you!");
        }
    }

    #[test]
    fn other_transitions_fall_back_to_generic_copy() {
        let msg = describe(&Transition {
            from: Completed,
            to: Pending,
        });
        assert_eq!(msg, "Status updated to pending");
    }
}
