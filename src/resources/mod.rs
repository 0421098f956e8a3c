//! Credential topology of the kube-controller-manager operator
//!
//! Declares where every piece of configuration and every credential that the
//! kube-controller-manager pod consumes comes from, starting at the release
//! payload, the installer and the cluster administrator.

use crate::graph::{Annotation, ConstructionError, Coordinate, Graph, Node};

/// Title of the rendered graph
pub const TITLE: &str = "kube-controller-manager-operator";

/// Configuration supplied by the cluster administrator
pub const GLOBAL_USER_SPECIFIED_CONFIG_NAMESPACE: &str = "openshift-config";
/// Configuration computed by operators and shared between them
pub const GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE: &str = "openshift-config-managed";
/// Where the operator itself runs
pub const OPERATOR_NAMESPACE: &str = "openshift-kube-controller-manager-operator";
/// Where the operand (the kube-controller-manager pods) runs
pub const TARGET_NAMESPACE: &str = "openshift-kube-controller-manager";

/// Build the provenance graph for the kube-controller-manager pod
pub fn kube_controller_manager() -> Result<Graph, ConstructionError> {
    use Annotation::*;

    let mut g = Graph::new();

    let payload = Node::resource(Coordinate::new("", "Payload", "", "cluster")).commit(&mut g)?;
    let installer =
        Node::resource(Coordinate::new("", "Installer", "", "cluster")).commit(&mut g)?;
    let user = Node::resource(Coordinate::new("", "User", "", "cluster")).commit(&mut g)?;

    let cvo = Node::operator("cluster-version")
        .derives_from(&payload)
        .commit(&mut g)?;
    let kas_operator = Node::operator("kube-apiserver")
        .derives_from(&cvo)
        .commit(&mut g)?;
    let kcm_operator = Node::operator("kube-controller-manager")
        .derives_from(&cvo)
        .commit(&mut g)?;
    let network_operator = Node::operator("network")
        .derives_from(&cvo)
        .commit(&mut g)?;
    let ingress_operator = Node::operator("ingress")
        .derives_from(&cvo)
        .commit(&mut g)?;
    let service_ca_operator = Node::operator("service-ca")
        .derives_from(&cvo)
        .commit(&mut g)?;

    // config.openshift.io
    let network_config = Node::config("networks")
        .derives_from(&user)
        .derives_from(&network_operator)
        .commit(&mut g)?;
    let infrastructure_config = Node::config("infrastructures")
        .derives_from(&user)
        .derives_from(&installer)
        .commit(&mut g)?;
    let apiservers_config = Node::config("apiservers")
        .derives_from(&user)
        .derives_from(&installer)
        .commit(&mut g)?;
    let proxies_config = Node::config("proxies")
        .derives_from(&user)
        .derives_from(&installer)
        .commit(&mut g)?;
    let feature_gates_config = Node::config("featuregates")
        .derives_from(&user)
        .derives_from(&installer)
        .commit(&mut g)?;

    // service account token signing key
    let initial_sa_key = Node::secret(
        GLOBAL_USER_SPECIFIED_CONFIG_NAMESPACE,
        "initial-service-account-private-key",
    )
    .with_annotation(Static)
    .derives_from(&installer)
    .commit(&mut g)?;
    let next_sa_key = Node::secret(OPERATOR_NAMESPACE, "next-service-account-private-key")
        .with_annotation(Static)
        .derives_from(&kcm_operator)
        .commit(&mut g)?;
    let sa_key = Node::secret(TARGET_NAMESPACE, "service-account-private-key")
        .with_annotation(Synchronized)
        .derives_from(&initial_sa_key)
        .derives_from(&next_sa_key)
        .commit(&mut g)?;
    // public halves, consumed by kube-apiserver
    Node::config_map(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "sa-token-signing-certs",
    )
    .with_annotation(Synchronized)
    .derives_from(&next_sa_key)
    .commit(&mut g)?;

    // client cert/key
    let control_plane_signer =
        Node::secret("openshift-kube-apiserver-operator", "kube-control-plane-signer")
            .with_annotation(Rotated)
            .derives_from(&kas_operator)
            .commit(&mut g)?;
    let managed_client_cert_key = Node::secret(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "kube-controller-manager-client-cert-key",
    )
    .with_annotation(Rotated)
    .derives_from(&control_plane_signer)
    .commit(&mut g)?;
    let client_cert_key = Node::secret(TARGET_NAMESPACE, "kube-controller-manager-client-cert-key")
        .with_annotation(Synchronized)
        .derives_from(&managed_client_cert_key)
        .commit(&mut g)?;

    // client CA bundle
    let client_ca = Node::config_map("openshift-kube-apiserver", "client-ca")
        .with_annotation(Rotated)
        .derives_from(&kas_operator)
        .commit(&mut g)?;
    let managed_client_ca = Node::config_map(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "kube-apiserver-client-ca",
    )
    .with_annotation(Synchronized)
    .derives_from(&client_ca)
    .commit(&mut g)?;
    let target_client_ca = Node::config_map(TARGET_NAMESPACE, "client-ca")
        .with_annotation(Synchronized)
        .derives_from(&managed_client_ca)
        .commit(&mut g)?;

    // aggregator client CA bundle
    let aggregator_client_ca = Node::config_map(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "kube-apiserver-aggregator-client-ca",
    )
    .with_annotation(Rotated)
    .derives_from(&kas_operator)
    .commit(&mut g)?;
    let target_aggregator_client_ca = Node::config_map(TARGET_NAMESPACE, "aggregator-client-ca")
        .with_annotation(Synchronized)
        .derives_from(&aggregator_client_ca)
        .commit(&mut g)?;

    // localhost client token for cert-syncer and recovery-controller
    let localhost_recovery_token =
        Node::secret(TARGET_NAMESPACE, "localhost-recovery-client-token")
            .with_annotation(Static)
            .derives_from(&kcm_operator)
            .commit(&mut g)?;

    // CSR signing
    let csr_signer_signer = Node::secret(OPERATOR_NAMESPACE, "csr-signer-signer")
        .with_annotation(Rotated)
        .derives_from(&kcm_operator)
        .commit(&mut g)?;
    let csr_signer_signer_ca = Node::config_map(OPERATOR_NAMESPACE, "csr-controller-signer-ca")
        .with_annotation(Rotated)
        .derives_from(&csr_signer_signer)
        .commit(&mut g)?;
    let managed_csr_signer = Node::secret(OPERATOR_NAMESPACE, "csr-signer")
        .with_annotation(Rotated)
        .derives_from(&csr_signer_signer)
        .commit(&mut g)?;
    let stripped_csr_signer = Node::secret(TARGET_NAMESPACE, "csr-signer")
        .with_annotation(Reduced)
        .derives_from(&managed_csr_signer)
        .commit(&mut g)?;
    let csr_signer_ca = Node::config_map(OPERATOR_NAMESPACE, "csr-signer-ca")
        .with_annotation(Rotated)
        .derives_from(&managed_csr_signer)
        .commit(&mut g)?;
    let operator_csr_ca = Node::config_map(OPERATOR_NAMESPACE, "csr-controller-ca")
        .with_annotation(Unioned)
        .derives_from(&csr_signer_ca)
        .derives_from(&csr_signer_signer_ca)
        .commit(&mut g)?;
    // consumed by kube-apiserver
    Node::config_map(GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE, "csr-controller-ca")
        .with_annotation(Synchronized)
        .derives_from(&operator_csr_ca)
        .commit(&mut g)?;

    // serviceaccount-ca bundle
    let kas_server_ca = Node::config_map(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "kube-apiserver-server-ca",
    )
    .with_annotation(Rotated)
    .derives_from(&kas_operator)
    .commit(&mut g)?;
    let router_wildcard_ca = Node::config_map(
        GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE,
        "default-ingress-cert",
    )
    .with_annotation(Static)
    .derives_from(&ingress_operator)
    .commit(&mut g)?;
    let service_account_ca = Node::config_map(TARGET_NAMESPACE, "serviceaccount-ca")
        .with_annotation(Unioned)
        .derives_from(&router_wildcard_ca)
        .derives_from(&kas_server_ca)
        .commit(&mut g)?;

    // service-ca signing key and CA bundle
    let service_ca_signing_key = Node::secret("openshift-service-ca", "signing-key")
        .with_annotation(Rotated)
        .derives_from(&service_ca_operator)
        .commit(&mut g)?;
    let service_ca_bundle = Node::config_map("openshift-service-ca", "signing-cabundle")
        .with_annotation(Rotated)
        .derives_from(&service_ca_signing_key)
        .commit(&mut g)?;
    let managed_service_ca = Node::config_map(GLOBAL_MACHINE_SPECIFIED_CONFIG_NAMESPACE, "service-ca")
        .with_annotation(Synchronized)
        .derives_from(&service_ca_bundle)
        .commit(&mut g)?;
    let target_service_ca = Node::config_map(TARGET_NAMESPACE, "service-ca")
        .with_annotation(Synchronized)
        .derives_from(&managed_service_ca)
        .commit(&mut g)?;

    // serving cert
    let service_ca_controller = Node::resource(Coordinate::new(
        "apps",
        "deployments",
        "openshift-service-ca",
        "service-ca",
    ))
    .derives_from(&service_ca_signing_key)
    .derives_from(&service_ca_operator)
    .commit(&mut g)?;
    let serving_cert = Node::secret(TARGET_NAMESPACE, "serving-cert")
        .with_annotation(Rotated)
        .derives_from(&service_ca_controller)
        .commit(&mut g)?;

    // observed config
    let observed_config = Node::config_map(TARGET_NAMESPACE, "config")
        .with_annotation(Managed)
        .derives_from(&infrastructure_config) // cloud provider
        .derives_from(&network_config) // service CIDR for controllers
        .derives_from(&apiservers_config) // TLS security profile
        .derives_from(&proxies_config) // proxy env in the pod
        .derives_from(&feature_gates_config)
        .commit(&mut g)?;

    Node::resource(Coordinate::new(
        "",
        "pods",
        TARGET_NAMESPACE,
        "kube-controller-manager",
    ))
    .derives_from(&sa_key)
    .derives_from(&client_cert_key)
    .derives_from(&service_account_ca)
    .derives_from(&target_client_ca)
    .derives_from(&target_aggregator_client_ca)
    .derives_from(&serving_cert)
    .derives_from(&target_service_ca)
    .derives_from(&localhost_recovery_token)
    .derives_from(&stripped_csr_signer)
    .derives_from(&observed_config)
    .commit(&mut g)?;

    tracing::debug!("Declared {} resources", g.len());
    Ok(g)
}
