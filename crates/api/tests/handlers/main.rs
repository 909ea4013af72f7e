mod availability_test;
mod medication_test;
mod patient_test;
mod routes_test;
