// Distancia entre edificios y tiempo estimado de caminata.
use crate::models::Coordinate;

/// Radio terrestre en km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Velocidad media caminando, km/h.
pub const WALKING_SPEED_KMH: f64 = 5.0;
/// Minutos extra para encontrar la sala.
pub const ROOM_BUFFER_MINUTES: f64 = 2.0;

/// Distancia de gran círculo (haversine) en kilómetros.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// `ceil(distancia / 5 km/h * 60 + 2)` minutos.
///
/// Los llamadores tratan el paso entre salas del mismo edificio como 0 y no
/// llaman a esta función en ese caso.
pub fn walking_minutes(a: Coordinate, b: Coordinate) -> u32 {
    let minutes = distance_km(a, b) / WALKING_SPEED_KMH * 60.0 + ROOM_BUFFER_MINUTES;
    minutes.ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const B63: Coordinate = Coordinate::new(26.3111, 50.2094);
    const B24: Coordinate = Coordinate::new(26.3130, 50.2070);

    #[test]
    fn test_distance_zero_and_symmetric() {
        assert_eq!(distance_km(B63, B63), 0.0);
        assert_eq!(distance_km(B63, B24), distance_km(B24, B63));
        assert!(distance_km(B63, B24) > 0.0);
    }

    #[test]
    fn test_distance_known_value() {
        // un grado de latitud ~ 111.19 km
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 111.195).abs() < 0.01, "d = {}", d);
    }

    #[test]
    fn test_walking_minutes_formula() {
        let d = distance_km(B63, B24);
        let expected = (d / 5.0 * 60.0 + 2.0).ceil() as u32;
        assert_eq!(walking_minutes(B63, B24), expected);
        // ~0.32 km entre los edificios 63 y 24
        assert_eq!(expected, 6);
        // mismas coordenadas: sólo el margen fijo
        assert_eq!(walking_minutes(B63, B63), 2);
    }
}
