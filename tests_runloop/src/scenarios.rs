//! Whole-device scenario tests

use crate::{register_system_apps, screen_clears, test_kernel, test_kernel_with_storage};
use app_api::{AppContext, AppCore, Application};
use core_types::{AppId, NodeId, Rgb565};
use hal::MemoryStore;
use mesh_api::{Datagram, MeshEvent, MeshNode};
use slated::DirStorage;
use sys_apps::{HOME_APP_ID, MESSENGER_APP_ID, SETTINGS_APP_ID};
use tempfile::tempdir;

struct ProbeApp {
    core: AppCore,
}

impl ProbeApp {
    fn boxed(app_id: u8) -> Box<dyn Application> {
        Box::new(Self {
            core: AppCore::new(AppId::new(app_id)),
        })
    }
}

impl Application for ProbeApp {
    fn core(&self) -> &AppCore {
        &self.core
    }
    fn core_mut(&mut self) -> &mut AppCore {
        &mut self.core
    }
    fn on_start(&mut self, _ctx: &mut AppContext) {}
    fn on_update(&mut self, _ctx: &mut AppContext) {}
    fn on_draw(&mut self, _ctx: &mut AppContext) {}
    fn on_exit(&mut self) {}
}

#[test]
fn boot_then_home_shows_builtin_shortcuts() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    kernel.launch_app(HOME_APP_ID);

    probes.idle(2);
    kernel.run();
    kernel.run();

    assert_eq!(kernel.foreground(), Some(HOME_APP_ID));
    assert!(probes.drew_text("Settings"));
    assert!(probes.drew_text("Chat"));
    assert!(probes.drew_text("Add"));
}

#[test]
fn tapping_the_settings_tile_switches_foreground() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    kernel.launch_app(HOME_APP_ID);

    probes.idle(1);
    probes.tap(45, 90);
    probes.idle(2);
    for _ in 0..5 {
        kernel.run();
    }

    assert_eq!(kernel.foreground(), Some(SETTINGS_APP_ID));
    assert!(probes.drew_text("DASHBOARD"));
}

#[test]
fn wifi_join_flow_persists_the_profile() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    kernel.launch_app(SETTINGS_APP_ID);

    probes.idle(1); // dashboard paints
    probes.tap(60, 100); // Wi-Fi tile
    probes.idle(1); // scan page paints
    probes.tap(100, 70); // first network row
    probes.idle(1); // keypad session begins
    probes.tap(4 + 10, 150 + 19); // 'q'
    probes.idle(1);
    probes.tap(200, 150 + 3 * 41 + 19); // OK
    probes.idle(3); // join completes, auto-save runs, dashboard repaints

    for _ in 0..14 {
        kernel.run();
    }

    assert!(probes.drew_text("HomeNet"));
    let device = kernel.device();
    assert_eq!(device.credentials.read("wifi", "ssid").as_deref(), Some("HomeNet"));
    assert_eq!(device.credentials.read("wifi", "pass").as_deref(), Some("q"));
}

#[test]
fn registry_survives_reboot_via_directory_storage() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state");

    {
        let (mut kernel, _probes) =
            test_kernel_with_storage(Box::new(DirStorage::open(&state).unwrap()));
        assert_eq!(kernel.registry().len(), 2);
        kernel
            .install_shortcut("Doom", "/doom.bin", Rgb565::new(0xF800))
            .unwrap();
    }

    let (kernel, _probes) = test_kernel_with_storage(Box::new(DirStorage::open(&state).unwrap()));
    assert_eq!(kernel.registry().len(), 3);
    assert_eq!(kernel.registry().shortcuts()[2].name, "Doom");
}

#[test]
fn registry_without_medium_is_exactly_the_builtins() {
    let (kernel, _probes) = test_kernel_with_storage(Box::new(MemoryStore::missing()));
    assert_eq!(kernel.registry().len(), 2);
}

#[test]
fn system_table_accepts_sixteen_apps_then_refuses() {
    let (mut kernel, _probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    for id in 3..16 {
        kernel.register_application(ProbeApp::boxed(id)).unwrap();
    }

    assert!(kernel.register_application(ProbeApp::boxed(20)).is_err());
    let ids = kernel.tasks().system_ids();
    assert_eq!(ids.len(), 16);
    assert_eq!(ids[0], HOME_APP_ID);
    assert_eq!(ids[15], AppId::new(15));
}

#[test]
fn peer_directory_deduplicates_by_segment_across_the_kernel() {
    let (mut kernel, _probes) = test_kernel();
    let x = NodeId::new(0x0000_1000_0000_0001);
    let y = NodeId::new(0x0000_1000_FFFF_FFFF);
    let z = NodeId::new(0x0000_2000_0000_0001);

    kernel.add_node(x);
    kernel.add_node(y);
    kernel.add_node(z);
    assert_eq!(kernel.discovered_nodes(), &[x, z]);
}

#[test]
fn toast_hide_edge_repaints_the_home_grid() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    kernel.launch_app(HOME_APP_ID);
    probes.idle(8);
    kernel.run();

    probes.clear_display();
    kernel.mesh_mut().inject_event(MeshEvent::JoinedNetwork {
        network: NodeId::new(1),
        node: NodeId::new(2),
    });
    kernel.run();
    assert!(probes.drew_text("Node connected to a network"));
    assert!(kernel.net_status().mesh_joined);
    let clears_before = screen_clears(&probes);

    probes.clock.set(1001);
    kernel.run(); // overlay hides, home is told to repaint
    kernel.run(); // home repaints the grid
    assert!(!kernel.toast().is_active());
    assert!(screen_clears(&probes) > clears_before);
}

#[test]
fn messenger_receives_a_datagram_into_the_open_chat() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    let peer = NodeId::new(5 << 44);
    kernel.add_node(peer);
    kernel.launch_app(MESSENGER_APP_ID);

    probes.idle(1); // contact list paints
    probes.tap(100, 80); // open the only contact
    probes.idle(2);
    for _ in 0..3 {
        kernel.run();
    }

    kernel.mesh_mut().deliver(peer, Datagram::from_text(1, "ciao"));
    probes.idle(1);
    kernel.run();
    assert!(probes.drew_text("ciao"));
}

#[test]
fn messenger_sends_via_locate_and_segment_push() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    let peer = NodeId::new(5 << 44);
    kernel.add_node(peer);
    kernel.launch_app(MESSENGER_APP_ID);

    probes.idle(1);
    probes.tap(100, 80); // open chat
    probes.idle(1);
    probes.tap(100, 300); // input bar opens the keypad
    probes.idle(1);
    probes.tap(4 + 10, 150 + 19); // 'q'
    probes.idle(1);
    probes.tap(200, 150 + 3 * 41 + 19); // send
    probes.idle(1);

    for _ in 0..13 {
        kernel.run();
    }

    let mesh = kernel.mesh();
    assert_eq!(mesh.locates(), &[(peer, 1)]);
    assert_eq!(mesh.sent().len(), 1);
    assert_eq!(mesh.sent()[0].0, peer.segment_address());
    assert_eq!(mesh.sent()[0].1.text(), "q");
    assert_eq!(mesh.statistic(mesh_api::CounterKind::DatagramsSent), 1);
}

#[test]
fn home_add_tile_installs_a_shortcut_through_the_keypad() {
    let (mut kernel, probes) = test_kernel();
    register_system_apps(&mut kernel).unwrap();
    kernel.launch_app(HOME_APP_ID);

    probes.idle(1); // grid paints
    probes.tap(195, 90); // the Add tile (third cell)
    probes.idle(1); // keypad session begins
    probes.tap(25, 150 + 41 + 19); // 'a'
    probes.idle(1);
    probes.tap(200, 150 + 3 * 41 + 19); // OK
    probes.idle(2);

    for _ in 0..9 {
        kernel.run();
    }

    assert_eq!(kernel.registry().len(), 3);
    let installed = &kernel.registry().shortcuts()[2];
    assert_eq!(installed.name, "a");
    assert_eq!(installed.exec_path, "/apps/a.bin");
    assert!(probes.drew_text("Shortcut installed"));
}

#[test]
fn opened_slot_overflow_exercised_through_the_kernel() {
    let (mut kernel, _probes) = test_kernel();
    for i in 0..4 {
        let slot = kernel.tasks_mut().open_app(ProbeApp::boxed(64 + i));
        assert_eq!(slot, i as usize);
    }
    let slot = kernel.tasks_mut().open_app(ProbeApp::boxed(99));
    assert_eq!(slot, 0);
    assert_eq!(
        kernel.tasks().opened_app(0).map(|app| app.app_id()),
        Some(AppId::new(99))
    );
}
